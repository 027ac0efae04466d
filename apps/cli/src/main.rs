use std::fs;
use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};

use anyhow::{Context as AnyhowContext, Result};
use clap::{ArgAction, Parser, Subcommand};
use proband_calc::{CalculationEngine, CalculationOptions, EmbeddedLibraryEngine};
use proband_models::{Bundle, DataRequirement, MeasureBundle, Period};
use proband_synth::{
    synthesize_patient, synthesize_resource, MeasurementPeriod, RandomSource, SeededRandom,
    ThreadRandom,
};
use proband_testcase::{
    bundle_to_test_case, create_patient_bundle, create_test_case_measure_report,
    data_requirement_filters_string, minimize, requirements_by_type, TestCase,
};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "proband",
    about = "eCQM test-case synthesis from measure bundles",
    version,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a measure bundle's data requirements with their code filters.
    Requirements {
        /// Path to the measure bundle JSON file.
        measure_bundle: PathBuf,
    },

    /// Synthesize patients with resources satisfying the measure's data requirements.
    Synthesize {
        /// Path to the measure bundle JSON file.
        measure_bundle: PathBuf,
        /// Number of patients to synthesize.
        #[arg(short = 'n', long, default_value_t = 1)]
        patients: usize,
        /// Measurement period start (YYYY-MM-DD or RFC 3339).
        #[arg(long, default_value = "2026-01-01")]
        mp_start: String,
        /// Measurement period end (YYYY-MM-DD or RFC 3339).
        #[arg(long, default_value = "2026-12-31")]
        mp_end: String,
        /// Seed for deterministic synthesis.
        #[arg(long)]
        seed: Option<u64>,
        /// Output directory for patient bundle files.
        #[arg(short, long, default_value = "test-cases")]
        output: PathBuf,
        /// Write a single zip archive instead of individual files.
        #[arg(long, action = ArgAction::SetTrue)]
        zip: bool,
    },

    /// Minimize patient bundles to the resources relevant to the measure.
    Minimize {
        /// Path to the measure bundle JSON file.
        measure_bundle: PathBuf,
        /// Patient bundle JSON files to minimize.
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Output directory for minimized bundles.
        #[arg(short, long, default_value = "minimized")]
        output: PathBuf,
    },

    /// Validate patient bundles for import against a measure bundle.
    Import {
        /// Path to the measure bundle JSON file.
        measure_bundle: PathBuf,
        /// Patient bundle JSON files or zip archives of them.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Requirements { measure_bundle } => {
            run_requirements(&measure_bundle).await?;
        }
        Commands::Synthesize {
            measure_bundle,
            patients,
            mp_start,
            mp_end,
            seed,
            output,
            zip,
        } => {
            run_synthesize(&measure_bundle, patients, &mp_start, &mp_end, seed, &output, zip)
                .await?;
        }
        Commands::Minimize {
            measure_bundle,
            files,
            output,
        } => {
            run_minimize(&measure_bundle, &files, &output).await?;
        }
        Commands::Import {
            measure_bundle,
            files,
        } => {
            run_import(&measure_bundle, &files)?;
        }
    }

    Ok(())
}

async fn run_requirements(measure_bundle_path: &Path) -> Result<()> {
    let measure_bundle = load_measure_bundle(measure_bundle_path)?;
    let requirements = extract_requirements(&measure_bundle).await?;
    let value_sets = measure_bundle.value_sets_map();

    for requirement in &requirements {
        let filters = data_requirement_filters_string(requirement, &value_sets);
        if filters.is_empty() {
            println!("{}", requirement.data_type);
        } else {
            println!("{}: {}", requirement.data_type, filters);
        }
    }
    Ok(())
}

async fn run_synthesize(
    measure_bundle_path: &Path,
    patients: usize,
    mp_start: &str,
    mp_end: &str,
    seed: Option<u64>,
    output: &Path,
    zip: bool,
) -> Result<()> {
    let measure_bundle = load_measure_bundle(measure_bundle_path)?;
    let requirements = extract_requirements(&measure_bundle).await?;
    let period = MeasurementPeriod::parse(mp_start, mp_end)
        .with_context(|| format!("Invalid measurement period {mp_start}..{mp_end}"))?;
    let report_period = Period {
        start: Some(mp_start.to_string()),
        end: Some(mp_end.to_string()),
    };

    let mut rng: Box<dyn RandomSource> = match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };

    let mut bundles = Vec::with_capacity(patients);
    for _ in 0..patients {
        let patient = synthesize_patient(&period, rng.as_mut());
        let mut test_case = TestCase::new(patient);
        let patient_id = test_case.patient_id().map(str::to_string);
        for requirement in &requirements {
            let resource = synthesize_resource(
                requirement,
                &measure_bundle,
                patient_id.as_deref(),
                &period,
                rng.as_mut(),
            )?;
            test_case.add_resource(resource);
        }

        let report = match measure_bundle.measure() {
            Some(_) => Some(create_test_case_measure_report(
                &measure_bundle,
                &report_period,
                patient_id.as_deref().unwrap_or_default(),
                &test_case.desired_populations,
            )?),
            None => None,
        };
        let bundle = create_patient_bundle(&test_case.patient, &test_case.resources, report.as_ref());
        let name = format!("{}.json", patient_id.as_deref().unwrap_or("patient"));
        bundles.push((name, serde_json::to_string_pretty(&bundle)?));
    }

    if zip {
        write_zip_archive(output, &bundles)?;
    } else {
        fs::create_dir_all(output)
            .with_context(|| format!("Failed to create output directory {:?}", output))?;
        for (name, content) in &bundles {
            let path = output.join(name);
            fs::write(&path, content)
                .with_context(|| format!("Failed to write {:?}", path))?;
        }
        eprintln!("Wrote {} patient bundles to {:?}", bundles.len(), output);
    }
    Ok(())
}

async fn run_minimize(
    measure_bundle_path: &Path,
    files: &[PathBuf],
    output: &Path,
) -> Result<()> {
    let measure_bundle = load_measure_bundle(measure_bundle_path)?;
    let requirements = extract_requirements(&measure_bundle).await?;
    let lookup = requirements_by_type(&requirements);
    let valid_codes = measure_bundle
        .measure()
        .map(|m| m.population_codes())
        .unwrap_or_default();

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {:?}", output))?;

    for path in files {
        let bundle = load_bundle(path)?;
        let test_case = bundle_to_test_case(&bundle, &valid_codes)
            .with_context(|| format!("Failed to import {:?}", path))?;
        let kept = minimize(&test_case, &measure_bundle, &lookup);
        let dropped = test_case.resources.len() - kept.len();
        let minimized = create_patient_bundle(&test_case.patient, &kept, None);

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "bundle.json".to_string());
        let out_path = output.join(&name);
        fs::write(&out_path, serde_json::to_string_pretty(&minimized)?)
            .with_context(|| format!("Failed to write {:?}", out_path))?;
        eprintln!(
            "{}: kept {} of {} resources",
            name,
            kept.len(),
            kept.len() + dropped
        );
    }
    Ok(())
}

fn run_import(measure_bundle_path: &Path, files: &[PathBuf]) -> Result<()> {
    let measure_bundle = load_measure_bundle(measure_bundle_path)?;
    let valid_codes = measure_bundle
        .measure()
        .map(|m| m.population_codes())
        .unwrap_or_default();

    let mut succeeded = 0usize;
    let mut failed = 0usize;
    for path in files {
        let payloads = if path.extension().is_some_and(|e| e == "zip") {
            read_zip_archive(path)?
        } else {
            vec![(
                path.to_string_lossy().into_owned(),
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {:?}", path))?,
            )]
        };

        for (name, content) in payloads {
            match import_one(&content, &valid_codes) {
                Ok(test_case) => {
                    succeeded += 1;
                    println!(
                        "{}: imported patient {} with {} resources",
                        name,
                        test_case.patient_id().unwrap_or("<unknown>"),
                        test_case.resources.len()
                    );
                }
                Err(error) => {
                    failed += 1;
                    println!("{}: {}", name, error);
                }
            }
        }
    }

    println!("{succeeded} succeeded, {failed} failed");
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn import_one(content: &str, valid_codes: &[String]) -> Result<TestCase> {
    let value: Value = serde_json::from_str(content).context("not valid JSON")?;
    let bundle = Bundle::from_value(&value).context("not a FHIR Bundle")?;
    Ok(bundle_to_test_case(&bundle, valid_codes)?)
}

async fn extract_requirements(measure_bundle: &MeasureBundle) -> Result<Vec<DataRequirement>> {
    let engine = EmbeddedLibraryEngine::new();
    let output = engine
        .calculate_data_requirements(measure_bundle, &CalculationOptions::default())
        .await
        .context("Failed to extract data requirements from measure bundle")?;
    Ok(output.results.data_requirement)
}

fn load_measure_bundle(path: &Path) -> Result<MeasureBundle> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in {:?}", path))?;
    MeasureBundle::from_value(&value)
        .with_context(|| format!("{:?} is not a measure bundle", path))
}

fn load_bundle(path: &Path) -> Result<Bundle> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in {:?}", path))?;
    Bundle::from_value(&value).with_context(|| format!("{:?} is not a FHIR Bundle", path))
}

fn write_zip_archive(output: &Path, bundles: &[(String, String)]) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory {:?}", parent))?;
        }
    }
    let path = if output.extension().is_some_and(|e| e == "zip") {
        output.to_path_buf()
    } else {
        output.with_extension("zip")
    };
    let file =
        fs::File::create(&path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut writer = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in bundles {
        writer
            .start_file(name.as_str(), options)
            .with_context(|| format!("Failed to add {name} to archive"))?;
        writer.write_all(content.as_bytes())?;
    }
    writer.finish().context("Failed to finish zip archive")?;
    eprintln!("Wrote {} patient bundles to {:?}", bundles.len(), path);
    Ok(())
}

fn read_zip_archive(path: &Path) -> Result<Vec<(String, String)>> {
    let file = fs::File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let mut archive =
        zip::ZipArchive::new(file).with_context(|| format!("{:?} is not a zip archive", path))?;
    let mut payloads = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() || !entry.name().ends_with(".json") {
            continue;
        }
        let mut content = String::new();
        entry
            .read_to_string(&mut content)
            .with_context(|| format!("Failed to read {} from {:?}", entry.name(), path))?;
        payloads.push((entry.name().to_string(), content));
    }
    Ok(payloads)
}
