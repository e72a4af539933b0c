use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "planet-builder"])
        .status()
        .expect("failed to invoke cargo check for planet-builder CLI binary");

    assert!(status.success(), "cargo check --bin planet-builder should succeed");
}
