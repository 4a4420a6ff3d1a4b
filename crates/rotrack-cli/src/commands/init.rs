//! The `rotrack init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("rotrack.toml").exists() {
        println!("rotrack.toml already exists, skipping.");
    } else {
        std::fs::write("rotrack.toml", SAMPLE_CONFIG)?;
        println!("Created rotrack.toml");
    }

    std::fs::create_dir_all("dossiers")?;
    let example_path = std::path::Path::new("dossiers/example.toml");
    if example_path.exists() {
        println!("dossiers/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_DOSSIER)?;
        println!("Created dossiers/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit dossiers/example.toml with the trainee's records");
    println!("  2. Run: rotrack validate --dossier dossiers/example.toml");
    println!("  3. Run: rotrack timeline --dossier dossiers/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# rotrack configuration

output_dir = "./rotrack-reports"
default_format = "text"
log_filter = "rotrack=info,rotrack_core=info"
"#;

const EXAMPLE_DOSSIER: &str = r#"[rotation]
name = "Internal Medicine"
duration_weeks = 8
evaluation_interval_days = 14

[enrollment]
trainee = "Example Trainee"
start_date = "2026-09-07"

[[evaluations]]
period_number = 1
performance_level = "PASS"
is_complete = true
evaluated_on = "2026-09-18"

[[evaluations]]
period_number = 2
performance_level = "HONORS"
is_complete = true
evaluated_on = "2026-10-02"

[[criteria]]
category = "fail"
section = "Professionalism"
description = "Misses handover without notice"

[[criteria]]
category = "fail"
section = "Patient care"
description = "Unsafe medication orders"

[[criteria]]
category = "pass"
section = "Patient care"
description = "Completes daily progress notes"
selected = true

[[criteria]]
category = "honors"
section = "Clinical reasoning"
description = "Builds a prioritised differential unprompted"
selected = true

[[criteria]]
category = "honors"
section = "Communication"
description = "Leads family meetings with supervision only"
"#;
