use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

const ELIGIBILITY_270: &str = concat!(
    "ISA*03*9876543210*01*9876543210*30*000000005      *30*12345          ",
    "*131031*1147*^*00501*000000907*1*T*:~",
    "GS*HS*000000005*54321*20131031*1147*1*X*005010X279A1~",
    "ST*270*0001*005010X279A1~",
    "BHT*0022*13*10001234*20060501*1319~",
    "HL*1**20*1~",
    "NM1*PR*2*PAYER C*****PI*11122~",
    "HL*2*1*21*1~",
    "NM1*1P*2*BONE AND JOINT CLINIC*****SV*2000035~",
    "HL*3*2*22*0~",
    "NM1*IL*1*SMITH*ROBERT****MI*11122333301~",
    "DMG*D8*19430519~",
    "DTP*291*D8*20060501~",
    "EQ*30~",
    "SE*12*0001~",
    "GE*1*1~",
    "IEA*1*000000907~",
);

fn cargo_bin() -> PathBuf {
    if let Ok(path) = env::var("CARGO_BIN_EXE_x12") {
        return PathBuf::from(path);
    }

    let target_dir = env::var("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("target"));
    let executable_name = format!("x12{}", env::consts::EXE_SUFFIX);
    let fallback = target_dir.join("debug").join(executable_name);

    if fallback.exists() {
        return fallback;
    }

    panic!(
        "CARGO_BIN_EXE_x12 is not set and fallback binary was not found at {}",
        fallback.display()
    );
}

fn write_input(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("failed to write X12 input");
    file
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(cargo_bin())
        .args(args)
        .output()
        .expect("failed to run x12 binary")
}

#[test]
fn test_model_mode_is_default_and_exits_zero() {
    let input = write_input(ELIGIBILITY_270);
    let output = run_cli(&[input.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("model output is JSON");
    let models = parsed.as_array().unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(
        models[0]["header"]["st_segment"]["transaction_set_identifier_code"],
        "270"
    );
    assert_eq!(
        models[0]["loop_2000a"][0]["hl_segment"]["hierarchical_level_code"],
        "20"
    );
}

#[test]
fn test_segment_mode_emits_positional_keys() {
    let input = write_input(ELIGIBILITY_270);
    let output = run_cli(&["--segment", input.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("segment output is JSON");
    let segments = parsed.as_array().unwrap();
    assert_eq!(segments[0]["ISA00"], "ISA");
    assert_eq!(segments[2]["ST01"], "270");
}

#[test]
fn test_exclude_drops_absent_fields() {
    let input = write_input(ELIGIBILITY_270);

    let full = run_cli(&[input.path().to_str().unwrap()]);
    let full: serde_json::Value = serde_json::from_slice(&full.stdout).unwrap();
    let nm1 = &full[0]["loop_2000a"][0]["loop_2100a"]["nm1_segment"];
    assert!(nm1.get("name_first").is_some());

    let excluded = run_cli(&["--exclude", input.path().to_str().unwrap()]);
    let excluded: serde_json::Value = serde_json::from_slice(&excluded.stdout).unwrap();
    let nm1 = &excluded[0]["loop_2000a"][0]["loop_2100a"]["nm1_segment"];
    assert!(nm1.get("name_first").is_none());
}

#[test]
fn test_error_diagnostics_exit_nonzero() {
    let mutated = ELIGIBILITY_270.replace("SE*12*0001~", "SE*13*0001~");
    let input = write_input(&mutated);
    let output = run_cli(&[input.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SE segment count 13"));
}

#[test]
fn test_malformed_envelope_exits_nonzero() {
    let input = write_input("ISA*short~");
    let output = run_cli(&[input.path().to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error"));
}

#[test]
fn test_segment_and_model_flags_conflict() {
    let input = write_input(ELIGIBILITY_270);
    let output = run_cli(&["--segment", "--model", input.path().to_str().unwrap()]);
    assert_ne!(output.status.code(), Some(0));
}
