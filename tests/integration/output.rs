//! Compiled output written and read through the runtime layer.

use std::path::PathBuf;

use marquee_compiler::{CompileOptions, Session};
use marquee_runtime::{
    CompiledOutput, output_from_bytes, read_tokens, write_tokens, write_units,
};

use crate::scripts::aviary;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("marquee-it-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn compile_aviary() -> CompiledOutput {
    let mut session = Session::new(CompileOptions::default());
    let units = session
        .compile_script(aviary())
        .into_iter()
        .map(Result::unwrap)
        .collect();
    CompiledOutput::new(units, session.registry())
}

#[test]
fn output_snapshot_matches_registry() {
    let output = compile_aviary();

    assert_eq!(output.units.len(), 3);
    let handlers: Vec<&str> = output.handlers.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(handlers, ["start"]);
    assert_eq!(output.factories.len(), 1);
    assert_eq!(output.factories[0].name, "Bird");
    assert_eq!(output.factories[0].methods[0].name, "mFly");
    assert_eq!(output.factories[0].methods[0].arg_count, 3);
}

#[test]
fn token_file_compiles_like_the_direct_stream() {
    let dir = scratch("tokens");
    let path = dir.join("aviary.mpk");
    write_tokens(&aviary(), &path).unwrap();

    let mut session = Session::new(CompileOptions::default());
    let from_file: Vec<_> = session
        .compile_script(read_tokens(&path).unwrap())
        .into_iter()
        .map(Result::unwrap)
        .collect();
    let direct = compile_aviary();

    assert_eq!(from_file, direct.units);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unit_file_reads_back_unchanged() {
    let dir = scratch("units");
    let path = dir.join("aviary.out");
    let output = compile_aviary();
    write_units(&output, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(output_from_bytes(&bytes).unwrap(), output);
    std::fs::remove_dir_all(&dir).unwrap();
}
