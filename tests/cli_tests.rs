mod common;

use anyhow::Result;
use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_compare_identical_texts() -> Result<()> {
    let env = TestEnv::new()?;
    let website = env.write("website.txt", "Welcome\nContact us\n")?;
    let file = env.write("file.txt", "  welcome  \nCONTACT US")?;

    env.command()?
        .arg("compare")
        .arg(&website)
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Perfect match"));

    Ok(())
}

#[test]
fn test_compare_side_by_side_reports_differences() -> Result<()> {
    let env = TestEnv::new()?;
    let website = env.write("website.txt", "Welcome\nPricing\nContact")?;
    let file = env.write("file.txt", "Welcome\nContact\nCareers")?;

    env.command()?
        .args(["compare", "--width", "40"])
        .arg(&website)
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 difference(s)"))
        .stdout(predicate::str::contains("Pricing"))
        .stdout(predicate::str::contains("Careers"));

    Ok(())
}

#[test]
fn test_compare_records_format() -> Result<()> {
    let env = TestEnv::new()?;
    let website = env.write("website.txt", "a\nb\nc")?;
    let file = env.write("file.txt", "a\nc\nd")?;

    env.command()?
        .args(["compare", "--format", "records"])
        .arg(&website)
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("- [2] b"))
        .stdout(predicate::str::contains("+ [3] d"));

    Ok(())
}

#[test]
fn test_compare_json_payload() -> Result<()> {
    let env = TestEnv::new()?;
    let website = env.write("website.txt", "a\nb")?;
    let file = env.write("file.txt", "a\nc")?;

    let output = env
        .command()?
        .args(["compare", "--format", "json"])
        .arg(&website)
        .arg(&file)
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["identical"], false);
    assert_eq!(json["total_differences"], 2);
    assert_eq!(json["simple_diffs"][0]["type"], "removed");
    assert_eq!(json["simple_diffs"][0]["website"], "b");
    assert_eq!(json["simple_diffs"][1]["type"], "added");
    assert_eq!(json["simple_diffs"][1]["line_number"], 2);

    Ok(())
}

#[test]
fn test_compare_reads_stdin() -> Result<()> {
    let env = TestEnv::new()?;
    let file = env.write("file.txt", "b\na")?;

    env.command()?
        .args(["compare", "--format", "json", "-"])
        .arg(&file)
        .write_stdin("a\nb\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"identical\": true"));

    Ok(())
}

#[test]
fn test_exit_code_flag() -> Result<()> {
    let env = TestEnv::new()?;
    let website = env.write("website.txt", "same")?;
    let differs = env.write("differs.txt", "other")?;
    let same = env.write("same.txt", "SAME")?;

    env.command()?
        .args(["compare", "--exit-code", "--format", "records"])
        .arg(&website)
        .arg(&differs)
        .assert()
        .code(1);

    env.command()?
        .args(["compare", "--exit-code", "--format", "records"])
        .arg(&website)
        .arg(&same)
        .assert()
        .success();

    // Without the flag a difference is not a failure
    env.command()?
        .args(["compare", "--format", "records"])
        .arg(&website)
        .arg(&differs)
        .assert()
        .success();

    Ok(())
}

#[test]
fn test_rejects_unsupported_file_type() -> Result<()> {
    let env = TestEnv::new()?;
    let website = env.write("page.html", "<p>hello</p>")?;
    let file = env.write("file.txt", "hello")?;

    env.command()?
        .arg("compare")
        .arg(&website)
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file type"));

    Ok(())
}

#[test]
fn test_rejects_binary_content() -> Result<()> {
    let env = TestEnv::new()?;
    let website = env.write("website.txt", [0u8, 159, 146, 150, 0, 1, 2])?;
    let file = env.write("file.txt", "hello")?;

    env.command()?
        .arg("compare")
        .arg(&website)
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file type"));

    Ok(())
}

#[test]
fn test_rejects_blank_input() -> Result<()> {
    let env = TestEnv::new()?;
    let website = env.write("website.txt", "content")?;
    let file = env.write("file.txt", "  \n\n")?;

    env.command()?
        .arg("compare")
        .arg(&website)
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Both texts are required for comparison"));

    Ok(())
}

#[test]
fn test_rejects_missing_file() -> Result<()> {
    let env = TestEnv::new()?;
    let file = env.write("file.txt", "content")?;

    env.command()?
        .arg("compare")
        .arg(env.path().join("missing.txt"))
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read input"));

    Ok(())
}

#[test]
fn test_rejects_file_over_size_limit() -> Result<()> {
    let env = TestEnv::new()?;
    let website = env.write("website.txt", "x".repeat(64))?;
    let file = env.write("file.txt", "x")?;

    env.command()?
        .args(["config", "input.max_file_size", "16"])
        .assert()
        .success();

    env.command()?
        .arg("compare")
        .arg(&website)
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("File too large"));

    Ok(())
}

#[test]
fn test_classify_lists_highlighted_lines() -> Result<()> {
    let env = TestEnv::new()?;
    let website = env.write("website.txt", "Welcome\nPricing")?;
    let file = env.write("file.txt", "Welcome to our site")?;

    let output = env
        .command()?
        .args(["classify", "--json"])
        .arg(&website)
        .arg(&file)
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json[0]["class"], "unchanged");
    assert_eq!(json[1]["class"], "removed");
    assert_eq!(json[1]["line_number"], 2);

    env.command()?
        .args(["classify", "--side", "file"])
        .arg(&website)
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 of 1 file lines highlighted"));

    Ok(())
}

#[test]
fn test_config_set_and_get() -> Result<()> {
    let env = TestEnv::new()?;

    env.command()?
        .args(["config", "display.format", "records"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Set display.format = records"));

    env.command()?
        .args(["config", "display.format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("records"));

    env.command()?
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[display]"))
        .stdout(predicate::str::contains("format = records"));

    env.command()?
        .args(["config", "display.width", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Column width"));

    Ok(())
}

#[test]
fn test_configured_format_is_used() -> Result<()> {
    let env = TestEnv::new()?;
    let website = env.write("website.txt", "a\nb")?;
    let file = env.write("file.txt", "a")?;

    env.command()?
        .args(["config", "display.format", "records"])
        .assert()
        .success();

    env.command()?
        .arg("compare")
        .arg(&website)
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("- [2] b"));

    Ok(())
}

#[test]
fn test_completion_generation() -> Result<()> {
    let env = TestEnv::new()?;

    env.command()?
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pagediff"));

    Ok(())
}
