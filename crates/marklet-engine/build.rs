use std::fmt::Write as _;
use std::path::Path;

/// Generates one test function per .md file in src/fixtures/.
/// This gives us both DRY code and individual test names in the runner.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = std::env::var("OUT_DIR")?;
    let dest = Path::new(&out_dir).join("fixture_tests.rs");

    let mut code = String::from(
        r#"mod fixtures {
    use super::fixture_test;
"#,
    );

    let mut entries: Vec<_> = std::fs::read_dir("src/fixtures")?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|path| path.extension().is_some_and(|e| e == "md"))
        .collect();
    entries.sort();

    for path in entries {
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        write!(
            code,
            r#"
    #[test]
    fn {name}() {{
        fixture_test("{name}");
    }}
"#
        )?;
    }

    code.push_str("}\n");
    std::fs::write(&dest, code)?;

    // Rerun if fixtures change
    println!("cargo::rerun-if-changed=src/fixtures");
    Ok(())
}
