use clap::Parser;
use stations_geojson::{Converter, Marker, DOWNLOAD_FILENAME};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input JSON file (stations, or areas carrying `area_list`)
    #[arg(short, long)]
    input: PathBuf,

    /// Output GeoJSON file
    #[arg(short, long, default_value = DOWNLOAD_FILENAME)]
    output: PathBuf,

    /// JSON file with an array of `{ lat, lng, name }` markers
    #[arg(long)]
    markers: Option<PathBuf>,

    /// Emit markers as Point features
    #[arg(long, default_value_t = false)]
    include_markers: bool,

    /// Write the `{ geojson, warnings }` envelope instead of the bare collection
    #[arg(long, default_value_t = false)]
    with_warnings: bool,

    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let args = Args::parse();

    println!("Reading input from {:?}", args.input);
    let reader = BufReader::new(File::open(&args.input)?);
    let data: serde_json::Value = serde_json::from_reader(reader)?;

    let mut converter = Converter::new();
    converter.include_markers = args.include_markers;
    if let Some(path) = &args.markers {
        let markers: Vec<Marker> = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        println!("Loaded {} markers.", markers.len());
        for marker in markers {
            converter.add_marker(marker);
        }
    }

    let conversion = converter.convert_with_warnings(&data)?;
    println!(
        "Converted {} features with {} warnings.",
        conversion.geojson.features.len(),
        conversion.warnings.len()
    );
    for warning in &conversion.warnings {
        println!("  [{:?}] {}", warning.issue, warning.message);
    }

    let mut writer = BufWriter::new(File::create(&args.output)?);
    if args.with_warnings {
        writer.write_all(conversion.to_json(args.pretty)?.as_bytes())?;
    } else if args.pretty {
        serde_json::to_writer_pretty(&mut writer, &conversion.geojson)?;
    } else {
        serde_json::to_writer(&mut writer, &conversion.geojson)?;
    }
    writer.flush()?;

    println!("Wrote output to {:?}", args.output);

    Ok(())
}
