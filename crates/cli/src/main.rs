use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use api_shared::{AssessReq, AssessRes, CatalogRes, SymptomsRes};
use medpredict_core::{load_catalog, AssessmentService, EngineConfig, EngineResult};

#[derive(Parser)]
#[command(name = "medpredict")]
#[command(about = "MedPredict symptom assessment CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a set of symptoms
    Assess {
        /// Symptom name (repeatable, or comma-separated)
        #[arg(short, long = "symptom", value_delimiter = ',')]
        symptoms: Vec<String>,
        /// Age in years
        #[arg(long, allow_hyphen_values = true)]
        age: Option<i32>,
        /// male, female or other
        #[arg(long)]
        gender: Option<String>,
        /// 1-2days, 3-7days, 1-2weeks or 2weeks+
        #[arg(long)]
        duration: Option<String>,
        /// mild, moderate or severe
        #[arg(long)]
        severity: Option<String>,
        /// Additional symptoms or notes
        #[arg(long)]
        notes: Option<String>,
        /// Maximum number of conditions to show
        #[arg(long)]
        max_results: Option<usize>,
        /// Catalog YAML to use instead of the builtin one
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the conditions in the catalog
    Catalog {
        /// Catalog YAML to use instead of the builtin one
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// List known symptom names
    Symptoms,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Assess {
            symptoms,
            age,
            gender,
            duration,
            severity,
            notes,
            max_results,
            catalog,
            json,
        }) => {
            let req = AssessReq {
                age,
                gender,
                symptoms,
                additional_notes: notes,
                duration,
                severity,
                max_results,
            };

            match run_assessment(&req, catalog.as_deref()) {
                Ok(res) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&res)?);
                    } else {
                        print!("{}", render_assessment(&res));
                    }
                }
                Err(e) => {
                    eprintln!("Error assessing symptoms: {}", e);
                    std::process::exit(2);
                }
            }
        }
        Some(Commands::Catalog { catalog }) => {
            let catalog = load_catalog(catalog.as_deref())?;
            for condition in CatalogRes::from(&catalog).conditions {
                println!(
                    "{} [{}] prior {:.0}%: {}",
                    condition.name,
                    condition.severity_class,
                    condition.base_probability * 100.0,
                    condition.description
                );
                println!("    symptoms: {}", condition.associated_symptoms.join(", "));
            }
        }
        Some(Commands::Symptoms) => {
            for symptom in SymptomsRes::vocabulary().symptoms {
                println!("{}", symptom);
            }
        }
        None => {
            println!("Use 'medpredict --help' for commands");
        }
    }

    Ok(())
}

/// Load the catalog, apply the result limit and assess the request.
fn run_assessment(req: &AssessReq, catalog: Option<&Path>) -> EngineResult<AssessRes> {
    let mut cfg = EngineConfig::default();
    if let Some(max_results) = req.max_results {
        cfg = cfg.with_max_results(max_results)?;
    }
    let service = AssessmentService::new(Arc::new(load_catalog(catalog)?), Arc::new(cfg));

    let result = service.assess(&req.to_intake()?)?;
    Ok(AssessRes::from_result(&result))
}

fn render_assessment(res: &AssessRes) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Analysis confidence: {}% ({})",
        res.confidence_percent, res.confidence_summary
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Possible conditions:");
    for (i, condition) in res.conditions.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} [{}] {}%",
            i + 1,
            condition.name,
            condition.severity_class,
            condition.match_percent
        );
        let _ = writeln!(out, "     {}", condition.description);
        if !condition.matched_symptoms.is_empty() {
            let _ = writeln!(
                out,
                "     matched: {}",
                condition.matched_symptoms.join(", ")
            );
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Recommendations:");
    for recommendation in &res.recommendations {
        let _ = writeln!(out, "  - {}", recommendation);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", res.disclaimer);

    out
}
