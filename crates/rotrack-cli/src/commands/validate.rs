//! The `rotrack validate` command.

use std::path::PathBuf;

use anyhow::Result;

use rotrack_core::parser;
use rotrack_core::schedule::total_periods;

pub fn execute(dossier_path: PathBuf) -> Result<()> {
    let dossiers = if dossier_path.is_dir() {
        parser::load_dossier_directory(&dossier_path)?
    } else {
        vec![parser::parse_dossier(&dossier_path)?]
    };

    let mut total_warnings = 0;

    for dossier in &dossiers {
        println!(
            "Dossier: {} ({} periods, {} evaluations, {} criteria)",
            dossier.rotation_name,
            total_periods(&dossier.rotation),
            dossier.evaluations.len(),
            dossier.criteria.len()
        );

        let warnings = parser::validate_dossier(dossier);
        for w in &warnings {
            let prefix = w
                .subject
                .as_ref()
                .map(|s| format!("  [{s}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All dossiers valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
