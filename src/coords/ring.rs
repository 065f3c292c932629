use geo_types::Coord;

/// Appends the first coordinate when the ring is open.
///
/// Rings whose endpoints carry NaN are left alone, since comparing them would
/// always report "open" and keep growing the ring.
pub fn close_ring(ring: &mut Vec<Coord<f64>>) {
    let (Some(&first), Some(&last)) = (ring.first(), ring.last()) else {
        return;
    };
    if is_comparable(first) && is_comparable(last) && first != last {
        ring.push(first);
    }
}

pub fn is_closed(ring: &[Coord<f64>]) -> bool {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) => first == last,
        _ => false,
    }
}

fn is_comparable(c: Coord<f64>) -> bool {
    !c.x.is_nan() && !c.y.is_nan()
}
