use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use whinstone_core::{
    BlockProgram, LayoutNode, MetadataRecord, decode_code, decode_layout, decode_metadata,
    encode_code, encode_layout, encode_metadata,
};

fn golden_dir(case: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("golden")
        .join(case)
}

fn load_input<T: DeserializeOwned>(case: &str) -> T {
    let path = golden_dir(case).join("input.json");
    let json = fs::read_to_string(&path).expect("read input.json");
    serde_json::from_str(&json).expect("parse input.json")
}

fn load_expected(case: &str) -> Vec<u8> {
    fs::read(golden_dir(case).join("expected.bin")).expect("read expected.bin")
}

fn run_golden<T, E, D>(
    case: &str,
    encode: impl Fn(&T) -> Result<Vec<u8>, E>,
    decode: impl Fn(&[u8]) -> Result<T, D>,
) where
    T: DeserializeOwned + PartialEq + Debug,
    E: Debug,
    D: Debug,
{
    let input: T = load_input(case);
    let expected = load_expected(case);

    let encoded = encode(&input).expect("encode golden input");
    assert_eq!(encoded, expected, "encoded bytes mismatch in {case}");

    let decoded = decode(&expected).expect("decode golden bytes");
    assert_eq!(decoded, input, "decoded value mismatch in {case}");
}

#[test]
fn golden_layout_two_level() {
    run_golden::<LayoutNode, _, _>("layout/two_level", encode_layout, decode_layout);
}

#[test]
fn golden_layout_nested() {
    run_golden::<LayoutNode, _, _>("layout/nested", encode_layout, decode_layout);
}

#[test]
fn golden_code_motion() {
    run_golden::<BlockProgram, _, _>("code/motion", encode_code, decode_code);
}

#[test]
fn golden_code_colors() {
    run_golden::<BlockProgram, _, _>("code/colors", encode_code, decode_code);
}

#[test]
fn golden_metadata_basic() {
    run_golden::<MetadataRecord, _, _>("metadata/basic", encode_metadata, decode_metadata);
}

#[test]
fn golden_code_motion_keeps_final_block() {
    let program = decode_code(&load_expected("code/motion")).expect("decode motion");
    let last = program.blocks.last().expect("final block");
    assert_eq!(last.opcode, "say");
    assert_eq!(last.parameters, vec!["hi".to_string(), "2".to_string()]);
}

#[test]
fn golden_code_colors_has_marker_valued_channels() {
    let program: BlockProgram = load_input("code/colors");
    let first = program.blocks[0].color;
    assert_eq!((first.red, first.green), (0x11, 0x22));
}
