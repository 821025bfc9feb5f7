//! Unit tests for value types, errors and the invocation contract types.
mod common;
use paramtree::prelude::*;

#[test]
fn test_param_value_display() {
    assert_eq!(format!("{}", ParamValue::Integer(42)), "42");
    assert_eq!(format!("{}", ParamValue::Float(2.5)), "2.5");
    assert_eq!(format!("{}", ParamValue::Boolean(true)), "true");
    assert_eq!(format!("{}", ParamValue::from("cam1")), "\"cam1\"");

    let params = CollectedParams::new().with(
        "Device",
        CollectedParams::new().with("Name", "cam1").with("Port", 80i64),
    );
    assert_eq!(format!("{}", params), "{Device: {Name: \"cam1\", Port: 80}}");
}

#[test]
fn test_leaf_type_names() {
    for name in ["string", "integer", "float", "boolean"] {
        assert_eq!(LeafType::from_name(name).as_str(), name);
    }
    assert_eq!(
        LeafType::from_name("datetime"),
        LeafType::Other("datetime".to_string())
    );
    assert_eq!(LeafType::default(), LeafType::String);
    assert_eq!(format!("{}", LeafType::Other("Vector2D".to_string())), "Vector2D");
}

#[test]
fn test_leaf_descriptor_serializes_for_ui() {
    let schema = SchemaTree::new(vec![
        SchemaNode::leaf("StreamType", LeafType::String)
            .required()
            .with_enum(["RTP-Unicast", "RTP-Multicast"]),
        SchemaNode::leaf("Tokens", LeafType::String).with_max_occurs(Occurs::Unbounded),
    ]);
    let leaves = ParamCodec::flatten(&schema);
    let json = serde_json::to_value(&leaves).unwrap();

    assert_eq!(
        json[0],
        serde_json::json!({
            "path": "StreamType",
            "name": "StreamType",
            "type": "string",
            "required": true,
            "enum_values": ["RTP-Unicast", "RTP-Multicast"],
            "min_occurs": 1,
            "max_occurs": 1,
            "depth": 0
        })
    );
    assert_eq!(json[1]["max_occurs"], "unbounded");
    assert!(json[1].get("enum_values").is_none());
}

#[test]
fn test_schema_node_accessors() {
    let schema = common::create_encoder_schema();
    assert_eq!(schema.len(), 2);
    assert_eq!(schema.leaf_count(), 10);

    let configuration = &schema.nodes[0];
    assert!(configuration.is_complex());
    assert!(!configuration.is_leaf());
    assert!(configuration.required);
    assert_eq!(configuration.min_occurs, 1);

    let names: Vec<_> = schema.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["Configuration", "ForcePersistence"]);
}

#[test]
fn test_collected_params_path_lookup() {
    let params = CollectedParams::new()
        .with(
            "Velocity",
            CollectedParams::new().with("PanTilt", CollectedParams::new().with("x", 0.5)),
        )
        .with("ProfileToken", "p1");

    assert_eq!(
        params.get_path("Velocity.PanTilt.x").and_then(ParamValue::as_f64),
        Some(0.5)
    );
    assert!(params.get_path("Velocity.PanTilt").unwrap().is_group());
    assert!(params.get_path("Velocity.Zoom.x").is_none());
    assert!(params.get_path("ProfileToken.x").is_none());
    assert_eq!(
        params.keys().collect::<Vec<_>>(),
        vec!["Velocity", "ProfileToken"]
    );
}

#[test]
fn test_error_display() {
    let err = CodecError::Coercion {
        path: "Device.Port".to_string(),
        raw: "abc".to_string(),
        expected: LeafType::Integer,
    };
    assert_eq!(
        err.to_string(),
        "Value 'abc' at 'Device.Port' could not be coerced to integer"
    );

    let multiple = CodecError::Multiple(vec![err.clone(), CodecError::InvalidPath("a..b".to_string())]);
    let message = multiple.to_string();
    assert!(message.starts_with("2 parameter values could not be collected"));
    assert!(message.contains("Device.Port"));
    assert!(message.contains("a..b"));
    assert_eq!(multiple.path(), None);

    let schema_err = SchemaError::InvalidOccurs {
        name: "Items".to_string(),
        value: "many".to_string(),
    };
    assert!(schema_err.to_string().contains("Items"));
    assert!(schema_err.to_string().contains("many"));
}

#[test]
fn test_connection_params_hide_password() {
    let connection =
        ConnectionParams::new("192.168.1.64", 8080, "admin", "hunter2").with_transport(Transport::Https);

    assert_eq!(connection.base_url(), "https://192.168.1.64:8080");

    let debug = format!("{:?}", connection);
    assert!(!debug.contains("hunter2"));
    assert!(debug.contains("admin"));

    let json = serde_json::to_value(&connection).unwrap();
    assert!(json.get("password").is_none());
    assert_eq!(json["transport"], "https");
}

#[test]
fn test_invocation_result_shape() {
    let ok = InvocationResult::succeeded(serde_json::json!({ "Uri": "rtsp://cam/stream" }))
        .with_traces("<request/>", "<response/>")
        .with_elapsed_ms(245.0);
    assert!(ok.success);
    assert!(ok.error.is_none());
    assert_eq!(ok.request_trace.as_deref(), Some("<request/>"));

    let failed = InvocationResult::failed("Sender not authorized");
    assert!(!failed.success);
    assert!(failed.result_data.is_none());

    let decoded: InvocationResult =
        serde_json::from_str(r#"{ "success": false, "error": "timeout" }"#).unwrap();
    assert_eq!(decoded, InvocationResult::failed("timeout"));
}
