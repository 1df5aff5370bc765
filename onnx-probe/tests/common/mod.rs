// Copyright (c) 2025 Pratik Barhate
// Licensed under the MIT License. See the LICENSE file in the project root for more information.

//! On-disk ONNX fixtures for the integration tests.
//!
//! The main fixture graph is `y = Add(Relu(x), Relu(x))` with `x, y: float[1, 4]`;
//! a second one is `ids -> Identity -> out` over `int64[1, 4]`. Both are written
//! as raw protobuf so the tests need no model files in the repository.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

const WIRE_VARINT: u64 = 0;
const WIRE_LEN: u64 = 2;
const ELEM_TYPE_FLOAT: u64 = 1;
const ELEM_TYPE_INT64: u64 = 7;

fn put_varint(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buf.push((value as u8) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

fn put_int(buf: &mut Vec<u8>, field: u64, value: u64) {
    put_varint(buf, (field << 3) | WIRE_VARINT);
    put_varint(buf, value);
}

fn put_bytes(buf: &mut Vec<u8>, field: u64, data: &[u8]) {
    put_varint(buf, (field << 3) | WIRE_LEN);
    put_varint(buf, data.len() as u64);
    buf.extend_from_slice(data);
}

fn value_info(name: &str, elem_type: u64, shape: &[u64]) -> Vec<u8> {
    let mut dims = Vec::new();
    for dim in shape {
        let mut dimension = Vec::new();
        put_int(&mut dimension, 1, *dim);
        put_bytes(&mut dims, 1, &dimension);
    }
    let mut tensor_type = Vec::new();
    put_int(&mut tensor_type, 1, elem_type);
    put_bytes(&mut tensor_type, 2, &dims);
    let mut type_proto = Vec::new();
    put_bytes(&mut type_proto, 1, &tensor_type);

    let mut info = Vec::new();
    put_bytes(&mut info, 1, name.as_bytes());
    put_bytes(&mut info, 2, &type_proto);
    info
}

fn node(op_type: &str, inputs: &[&str], outputs: &[&str]) -> Vec<u8> {
    let mut node = Vec::new();
    for input in inputs {
        put_bytes(&mut node, 1, input.as_bytes());
    }
    for output in outputs {
        put_bytes(&mut node, 2, output.as_bytes());
    }
    put_bytes(&mut node, 4, op_type.as_bytes());
    node
}

/// Serialized ModelProto of the float fixture graph.
pub fn relu_add_model_bytes() -> Vec<u8> {
    let mut graph = Vec::new();
    put_bytes(&mut graph, 1, &node("Relu", &["x"], &["r"]));
    put_bytes(&mut graph, 1, &node("Add", &["r", "r"], &["y"]));
    put_bytes(&mut graph, 2, b"relu_add");
    put_bytes(&mut graph, 11, &value_info("x", ELEM_TYPE_FLOAT, &[1, 4]));
    put_bytes(&mut graph, 12, &value_info("y", ELEM_TYPE_FLOAT, &[1, 4]));
    model_bytes(&graph)
}

/// Serialized ModelProto of the int64 identity graph.
pub fn int64_identity_model_bytes() -> Vec<u8> {
    let mut graph = Vec::new();
    put_bytes(&mut graph, 1, &node("Identity", &["ids"], &["out"]));
    put_bytes(&mut graph, 2, b"int64_identity");
    put_bytes(&mut graph, 11, &value_info("ids", ELEM_TYPE_INT64, &[1, 4]));
    put_bytes(&mut graph, 12, &value_info("out", ELEM_TYPE_INT64, &[1, 4]));
    model_bytes(&graph)
}

fn model_bytes(graph: &[u8]) -> Vec<u8> {
    let mut opset = Vec::new();
    put_bytes(&mut opset, 1, b"");
    put_int(&mut opset, 2, 13);

    let mut model = Vec::new();
    put_int(&mut model, 1, 7);
    put_bytes(&mut model, 2, b"onnx-probe-tests");
    put_bytes(&mut model, 7, graph);
    put_bytes(&mut model, 8, &opset);
    model
}

/// A file in the system temp directory, removed on drop.
pub struct TempModel {
    path: PathBuf,
}

impl TempModel {
    pub fn write(bytes: &[u8]) -> Self {
        let path = std::env::temp_dir().join(format!("onnx_probe_{}.onnx", uuid::Uuid::new_v4()));
        fs::write(&path, bytes).unwrap();
        TempModel { path }
    }

    pub fn relu_add() -> Self {
        Self::write(&relu_add_model_bytes())
    }

    pub fn int64_identity() -> Self {
        Self::write(&int64_identity_model_bytes())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempModel {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
