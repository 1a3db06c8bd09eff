use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::sync::Arc;
use triage_core::{ArtifactPaths, RuleTable, TriageEngine, TriageError};
use triage_model::LinearSpecialtyModel;
use triage_nlp::{LexiconLemmatizer, DEFAULT_NEGATION_EXCEPTIONS};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Symptom triage decision engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a single symptom description
    Assess {
        /// Free-text symptom description (Spanish)
        text: String,
    },
    /// Interactive console mode: assess descriptions until 'salir'
    Interactive,
    /// Print the urgency rule table
    Rules,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Assess { text }) => {
            let engine = build_engine()?;
            assess_and_print(&engine, &text);
        }
        Some(Commands::Interactive) => {
            let engine = build_engine()?;
            interactive(&engine)?;
        }
        Some(Commands::Rules) => {
            let table = RuleTable::builtin();
            for rule in table.rules() {
                println!(
                    "Nivel {}: {} (espera: {})",
                    rule.level, rule.name, rule.target_wait
                );
                println!("  palabras clave: {}", rule.keywords.join(", "));
            }
        }
        None => {
            println!("Use 'triage --help' for commands");
        }
    }

    Ok(())
}

/// Loads artifacts from the environment and constructs the engine once.
fn build_engine() -> Result<TriageEngine, Box<dyn std::error::Error>> {
    let paths = ArtifactPaths::from_env_values(
        std::env::var("TRIAGE_LEXICON_PATH").ok(),
        std::env::var("TRIAGE_MODEL_PATH").ok(),
        std::env::var("TRIAGE_RULES_PATH").ok(),
    );

    let lemmatizer =
        LexiconLemmatizer::from_artifact(paths.lexicon(), DEFAULT_NEGATION_EXCEPTIONS)?;
    let model = LinearSpecialtyModel::from_artifact(paths.model())?;
    let rules = match paths.rules() {
        Some(path) => RuleTable::from_yaml_file(path)?,
        None => RuleTable::builtin(),
    };

    Ok(TriageEngine::new(
        Arc::new(lemmatizer),
        Arc::new(model),
        rules,
    )?)
}

fn assess_and_print(engine: &TriageEngine, text: &str) {
    match engine.assess(text) {
        Ok(assessment) => {
            println!("Procesado: '{}'", assessment.normalized_text);
            println!("Especialidad: {}", assessment.specialty);
            println!(
                "Confianza: {:.1}% ({})",
                assessment.confidence.value() * 100.0,
                assessment.confidence.tier()
            );
            println!(
                "Triaje: Nivel {} - {} (espera: {})",
                assessment.urgency_level, assessment.urgency_name, assessment.target_wait
            );
            println!("Derivación: {}", assessment.facility);
            println!("Acción: {}", assessment.action);
            println!("{}", assessment.message);
            println!();
            println!("Consejo: {}", assessment.advice.advice);
            for medida in &assessment.advice.measures {
                println!("  - {}", medida);
            }
            println!();
            println!(
                "Análisis realizado: {}",
                chrono::Local::now().format("%d/%m/%Y %H:%M:%S")
            );
        }
        Err(err @ TriageError::InsufficientInput { .. }) => {
            let urgency = engine.match_urgency(text);
            eprintln!("Texto insuficiente o no válido: {}", err);
            eprintln!(
                "Triaje preliminar: Nivel {} - {} (espera: {})",
                urgency.level, urgency.name, urgency.target_wait
            );
            eprintln!("Describa los síntomas con más detalle.");
        }
        Err(err) => {
            eprintln!("Error al evaluar los síntomas: {}", err);
        }
    }
}

/// Console loop mirroring the web chat: one description per line.
fn interactive(engine: &TriageEngine) -> Result<(), Box<dyn std::error::Error>> {
    println!("SISTEMA DE TRIAJE (modo consola)");
    println!("Escriba los síntomas del paciente (o 'salir' para terminar).");

    let stdin = std::io::stdin();
    loop {
        print!("\nDescriba el caso: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if matches!(line.to_lowercase().as_str(), "salir" | "exit" | "q") {
            println!("Hasta luego.");
            break;
        }
        if line.is_empty() {
            continue;
        }

        assess_and_print(engine, line);
    }

    Ok(())
}
