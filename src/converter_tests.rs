#[cfg(test)]
mod tests {
    use crate::{convert_str, ConversionError, ConvertOptions, Converter, Marker, WarningIssue};
    use geojson::Value;
    use serde_json::json;

    fn ring_of(feature: &geojson::Feature) -> Vec<Vec<f64>> {
        match &feature.geometry.as_ref().unwrap().value {
            Value::Polygon(rings) => {
                assert_eq!(rings.len(), 1, "Expected a single ring without holes");
                rings[0].clone()
            }
            other => panic!("Expected Polygon, got {:?}", other),
        }
    }

    fn name_of(feature: &geojson::Feature) -> &str {
        feature.property("name").and_then(|v| v.as_str()).unwrap()
    }

    #[test]
    fn test_square_end_to_end() {
        let input = json!([{
            "name": "Square",
            "polygon": [
                { "lat": 0, "long": 0 },
                { "lat": 0, "long": 1 },
                { "lat": 1, "long": 1 },
                { "lat": 1, "long": 0 }
            ]
        }]);

        let conversion = Converter::new().convert_with_warnings(&input).unwrap();
        assert!(conversion.warnings.is_empty());
        assert_eq!(conversion.geojson.features.len(), 1);

        let feature = &conversion.geojson.features[0];
        assert_eq!(name_of(feature), "Square");
        assert_eq!(
            ring_of(feature),
            vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0], vec![0.0, 1.0], vec![0.0, 0.0]]
        );
    }

    #[test]
    fn test_already_closed_ring_untouched() {
        let input = json!([{
            "name": "Closed",
            "polygon": [
                { "latitude": 0, "longitude": 0 },
                { "latitude": 0, "longitude": 2 },
                { "latitude": 2, "longitude": 2 },
                { "latitude": 0, "longitude": 0 }
            ]
        }]);

        let fc = Converter::new().convert(&input).unwrap();
        assert_eq!(ring_of(&fc.features[0]).len(), 4);
    }

    #[test]
    fn test_bad_json_is_not_fatal() {
        let input = json!([
            { "name": "A", "polygon": [{ "lat": 1, "lng": 1 }, { "lat": 2, "lng": 2 }] },
            { "name": "X", "polygon": "not json" },
            { "name": "C", "polygon": "[{\"lat\": 3, \"lon\": 3}]" }
        ]);

        let conversion = Converter::new().convert_with_warnings(&input).unwrap();
        let names: Vec<_> = conversion.geojson.features.iter().map(name_of).collect();
        assert_eq!(names, vec!["A", "C"]);

        assert_eq!(conversion.warnings.len(), 1);
        let warning = &conversion.warnings[0];
        assert_eq!(warning.issue, WarningIssue::InvalidJson);
        assert_eq!(warning.feature_name, "X");
        assert_eq!(warning.feature_index, 1);
        assert_eq!(warning.coordinate_index, -1);
    }

    #[test]
    fn test_structural_gate_rejects_whole_batch() {
        let input = json!([
            { "name": "A", "polygon": [{ "lat": 1, "lng": 1 }] },
            { "polygon": [{ "lat": 1, "lng": 1 }] },
            { "name": "C", "polygon": "definitely not json" }
        ]);

        let err = Converter::new().convert_with_warnings(&input).unwrap_err();
        match &err {
            ConversionError::MissingField { field, path } => {
                assert_eq!(*field, "name");
                assert_eq!(path, "data[1]");
            }
            other => panic!("Expected MissingField, got {:?}", other),
        }
        assert!(err.is_client_error());
    }

    #[test]
    fn test_bad_coordinates_keep_feature() {
        let input = json!([{
            "name": "Partial",
            "polygon": [
                { "lat": "abc", "lng": 106.8 },
                { "lat": -6.2, "lng": 106.9 },
                { "lat": -6.3, "lng": 106.7 }
            ]
        }]);

        let conversion = Converter::new().convert_with_warnings(&input).unwrap();
        assert_eq!(conversion.geojson.features.len(), 1);

        let ring = ring_of(&conversion.geojson.features[0]);
        assert_eq!(ring.first(), Some(&vec![106.8, 0.0]));
        assert_eq!(ring.first(), ring.last());
        assert_eq!(ring.len(), 4);

        assert_eq!(conversion.warnings.len(), 1);
        assert_eq!(conversion.warnings[0].issue, WarningIssue::InvalidLatitude);
        assert_eq!(conversion.warnings[0].coordinate, [106.8, 0.0]);
        assert_eq!(conversion.warnings[0].coordinate_index, 0);
    }

    #[test]
    fn test_nested_warning_uses_global_index() {
        let input = json!([
            { "area_list": [
                { "name": "A", "polygon": [{ "lat": 1, "lng": 1 }] },
                { "name": "B", "polygon": [{ "lat": 1, "lng": 1 }] }
            ]},
            { "area_list": [
                { "name": "C", "polygon": [{ "lat": 1, "lng": 1 }, { "lat": 95, "lng": 1 }] }
            ]}
        ]);

        let conversion = Converter::new().convert_with_warnings(&input).unwrap();
        assert_eq!(conversion.geojson.features.len(), 3);
        assert_eq!(conversion.warnings.len(), 1);
        assert_eq!(conversion.warnings[0].feature_index, 2);
        assert_eq!(conversion.warnings[0].coordinate_index, 1);
        assert_eq!(conversion.warnings[0].coordinate, [1.0, 95.0]);
    }

    #[test]
    fn test_markers_always_emitted() {
        let mut converter = Converter::new();
        converter.include_markers = true;
        converter.add_marker(Marker::new(200.0, 10.0, "Bad"));
        converter.add_marker(Marker {
            lat: json!(-6.2),
            lng: json!(106.8),
            name: Some("  ".to_string()),
        });

        let conversion = converter.convert_with_warnings(&json!([])).unwrap();
        let features = &conversion.geojson.features;
        assert_eq!(features.len(), 2);

        assert_eq!(name_of(&features[0]), "Bad");
        match &features[0].geometry.as_ref().unwrap().value {
            Value::Point(coords) => assert_eq!(coords, &vec![10.0, 200.0]),
            other => panic!("Expected Point, got {:?}", other),
        }
        assert_eq!(name_of(&features[1]), "Custom Marker");

        assert_eq!(conversion.warnings.len(), 1);
        assert_eq!(conversion.warnings[0].issue, WarningIssue::InvalidLatitude);
        assert_eq!(conversion.warnings[0].feature_index, -1);
        assert_eq!(conversion.warnings[0].feature_name, "Bad");
    }

    #[test]
    fn test_markers_ignored_unless_requested() {
        let converter = Converter::with_options(ConvertOptions {
            include_markers: false,
            markers: vec![Marker::new(1.0, 1.0, "Hidden")],
        });
        let fc = converter.convert(&json!([])).unwrap();
        assert!(fc.features.is_empty());
    }

    #[test]
    fn test_markers_follow_polygons() {
        let converter = Converter::with_options(ConvertOptions {
            include_markers: true,
            markers: vec![Marker::new(1.0, 1.0, "Pin")],
        });
        let input = json!([{ "name": "Area", "polygon": [{ "lat": 0, "lng": 0 }] }]);
        let fc = converter.convert(&input).unwrap();

        let names: Vec<_> = fc.features.iter().map(name_of).collect();
        assert_eq!(names, vec!["Area", "Pin"]);
    }

    #[test]
    fn test_convert_str_request_body() {
        let body = r#"{
            "data": [{ "name": "S", "polygon": [{ "lat": 0, "lng": 0 }, { "lat": 0, "lng": 1 }] }],
            "includeMarkers": true,
            "markers": [{ "lat": 5, "lng": 5 }]
        }"#;

        let conversion = convert_str(body).unwrap();
        assert_eq!(conversion.geojson.features.len(), 2);
        assert!(!conversion.has_warnings());
    }

    #[test]
    fn test_convert_str_errors() {
        let err = convert_str("{ not json").unwrap_err();
        assert!(matches!(err, ConversionError::MalformedRequest(_)));
        assert!(err.is_client_error());

        let err = convert_str(r#"{ "data": { "name": "S" } }"#).unwrap_err();
        assert!(matches!(err, ConversionError::InvalidInput(_)));

        let err = convert_str("{}").unwrap_err();
        assert!(matches!(err, ConversionError::InvalidInput(_)));
    }

    #[test]
    fn test_serialized_response_shape() {
        let input = json!([{ "name": "S", "polygon": [{ "lat": 0, "lng": 0 }] }]);
        let clean = Converter::new().convert_with_warnings(&input).unwrap();
        let value: serde_json::Value = serde_json::from_str(&clean.to_json(false).unwrap()).unwrap();

        assert_eq!(value["geojson"]["type"], "FeatureCollection");
        assert_eq!(value["geojson"]["features"][0]["type"], "Feature");
        assert_eq!(value["geojson"]["features"][0]["geometry"]["type"], "Polygon");
        assert_eq!(value["geojson"]["features"][0]["properties"]["name"], "S");
        assert!(value.get("warnings").is_none());

        let input = json!([{ "name": "S", "polygon": [{ "lat": "?", "lng": 0 }] }]);
        let noisy = Converter::new().convert_with_warnings(&input).unwrap();
        let value: serde_json::Value = serde_json::from_str(&noisy.to_json(true).unwrap()).unwrap();

        let warning = &value["warnings"][0];
        assert_eq!(warning["featureIndex"], 0);
        assert_eq!(warning["featureName"], "S");
        assert_eq!(warning["coordinateIndex"], 0);
        assert_eq!(warning["issue"], "invalid_latitude");
        assert_eq!(warning["coordinate"], json!([0.0, 0.0]));
    }
}
