//! Common test utilities for building parameter schemas and raw inputs.
use paramtree::prelude::*;

/// `Device { Name: string, Port: integer }`
#[allow(dead_code)]
pub fn create_device_schema() -> SchemaTree {
    SchemaTree::new(vec![SchemaNode::complex(
        "Device",
        vec![
            SchemaNode::leaf("Name", LeafType::String),
            SchemaNode::leaf("Port", LeafType::Integer),
        ],
    )])
}

/// A video encoder configuration similar to the media service's
/// `SetVideoEncoderConfiguration` input: nested groups, enums and an attribute.
#[allow(dead_code)]
pub fn create_encoder_schema() -> SchemaTree {
    SchemaTree::new(vec![
        SchemaNode::complex(
            "Configuration",
            vec![
                SchemaNode::leaf("Name", LeafType::String).required(),
                SchemaNode::leaf("UseCount", LeafType::Integer).required(),
                SchemaNode::leaf("Encoding", LeafType::String)
                    .required()
                    .with_enum(["JPEG", "MPEG4", "H264"]),
                SchemaNode::complex(
                    "Resolution",
                    vec![
                        SchemaNode::leaf("Width", LeafType::Integer).required(),
                        SchemaNode::leaf("Height", LeafType::Integer).required(),
                    ],
                ),
                SchemaNode::leaf("Quality", LeafType::Float).required(),
                SchemaNode::complex(
                    "RateControl",
                    vec![
                        SchemaNode::leaf("FrameRateLimit", LeafType::Integer),
                        SchemaNode::leaf("BitrateLimit", LeafType::Integer),
                    ],
                ),
                SchemaNode::leaf("@token", LeafType::String),
            ],
        )
        .required(),
        SchemaNode::leaf("ForcePersistence", LeafType::Boolean).required(),
    ])
}

/// The JSON shape produced by the schema source for a `ContinuousMove` operation,
/// wrapped in the operation-params envelope.
#[allow(dead_code)]
pub const PTZ_SCHEMA_JSON: &str = r#"{
    "success": true,
    "params": [
        {
            "name": "ProfileToken",
            "type": "ReferenceToken",
            "required": true,
            "is_complex": false,
            "min_occurs": 1,
            "max_occurs": "1"
        },
        {
            "name": "Velocity",
            "type": "PTZSpeed",
            "required": true,
            "is_complex": true,
            "min_occurs": 1,
            "max_occurs": "1",
            "children": [
                {
                    "name": "PanTilt",
                    "type": "Vector2D",
                    "required": false,
                    "is_complex": true,
                    "min_occurs": 0,
                    "max_occurs": "1",
                    "children": [
                        { "name": "x", "type": "float", "required": true, "is_complex": false, "min_occurs": 1, "max_occurs": "1" },
                        { "name": "y", "type": "float", "required": true, "is_complex": false, "min_occurs": 1, "max_occurs": "1" },
                        { "name": "@space", "type": "anyURI", "required": false, "is_complex": false, "min_occurs": 0, "max_occurs": "1" }
                    ]
                },
                {
                    "name": "Zoom",
                    "type": "Vector1D",
                    "required": false,
                    "is_complex": true,
                    "min_occurs": 0,
                    "max_occurs": "1",
                    "children": [
                        { "name": "x", "type": "double", "required": true, "is_complex": false, "min_occurs": 1, "max_occurs": "1" }
                    ]
                }
            ]
        },
        {
            "name": "Timeout",
            "type": "duration",
            "required": false,
            "is_complex": false,
            "min_occurs": 0,
            "max_occurs": "1"
        }
    ]
}"#;

/// Builds a typed value map from `(path, kind, raw)` triples.
#[allow(dead_code)]
pub fn values(entries: &[(&str, LeafType, &str)]) -> PathValueMap {
    let mut map = PathValueMap::new();
    for (path, kind, raw) in entries {
        map.insert(*path, kind.clone(), *raw);
    }
    map
}

/// Collects every path produced by flattening `schema`.
#[allow(dead_code)]
pub fn leaf_paths(schema: &SchemaTree) -> Vec<String> {
    ParamCodec::flatten(schema)
        .into_iter()
        .map(|leaf| leaf.path)
        .collect()
}
