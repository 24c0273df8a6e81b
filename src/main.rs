//! Composer - digital logic circuit composer.
//!
//! # Usage
//!
//! ```bash
//! composer build halfadd.edit          # replay an edit script, export components/HALFADD.txt
//! composer arity HALFADD               # 2
//! composer simulate HALFADD --all      # output value plus every component
//! composer -d lib show HALFADD         # read circuits from ./lib instead
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use circuit_composer::{
    circuit::{validate_circuit, Circuit},
    editor::{run_script, Editor},
    error::{ComposerError, Result},
    config::DEFAULT_MAX_SUBCIRCUIT_DEPTH,
    format, ArityResolver, EditorConfig, Simulator, DEFAULT_ARITY, DEFAULT_COMPONENTS_DIR,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Digital logic circuit composer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding exported circuits
    #[arg(short = 'd', long, global = true, default_value = DEFAULT_COMPONENTS_DIR)]
    components_dir: PathBuf,

    /// Arity of saved circuits that declare no inputs
    #[arg(long, global = true, default_value_t = DEFAULT_ARITY)]
    default_arity: usize,

    /// How deeply saved circuits may nest during simulation
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_SUBCIRCUIT_DEPTH)]
    max_subcircuit_depth: usize,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    fn config(&self) -> EditorConfig {
        EditorConfig::new()
            .with_components_dir(self.components_dir.clone())
            .with_default_arity(self.default_arity)
            .with_max_subcircuit_depth(self.max_subcircuit_depth)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the number of input ports of a gate type
    Arity {
        /// Built-in gate (AND, OR, XOR, NOT) or name of an exported circuit
        gate_type: String,
    },
    /// Describe an exported circuit
    Show {
        /// Circuit name (file stem in the components directory)
        name: String,
    },
    /// Simulate an exported circuit and print its output
    Simulate {
        /// Circuit name (file stem in the components directory)
        name: String,

        /// Also print the output of every component
        #[arg(short, long)]
        all: bool,
    },
    /// Replay an edit script and export the resulting circuit
    Build {
        /// Edit script, one command per line
        #[arg(value_name = "SCRIPT_FILE")]
        script: PathBuf,

        /// Export under this name instead of the one the script sets
        #[arg(short, long)]
        name: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = args.config();

    match args.command {
        Command::Arity { gate_type } => {
            let resolver = ArityResolver::from_config(&config);
            println!("{}", resolver.resolve(&gate_type)?);
        }
        Command::Show { name } => {
            let resolver = ArityResolver::from_config(&config);
            let doc = format::parse_file(&config.circuit_path(&name))?;
            let circuit = Circuit::from_document(doc, &resolver)?;
            describe(&name, &circuit);
        }
        Command::Simulate { name, all } => {
            let simulator = Simulator::new(&config);
            let circuit = simulator.load(&name)?;
            let result = simulator.simulate(&circuit)?;
            if all {
                for (id, values) in &result.components {
                    let ports: Vec<String> = values
                        .iter()
                        .map(|(port, &value)| format!("{port}={}", u8::from(value)))
                        .collect();
                    println!("{id}: {}", ports.join(" "));
                }
            }
            if let Some(output) = circuit.output() {
                println!("Output from {} index {}: {}", output.id, output.index, u8::from(result.value));
            }
        }
        Command::Build { script, name } => {
            let text = std::fs::read_to_string(&script).map_err(|e| ComposerError::file_read(&script, e))?;
            let mut editor = Editor::new(config);
            run_script(&mut editor, &text)?;
            if let Some(name) = name {
                editor.set_name(&name)?;
            }
            for diagnostic in editor.diagnostics() {
                warn!("{}", diagnostic);
            }
            let path = editor.export()?;
            println!("Saved to {}", path.display());
        }
    }

    Ok(())
}

fn describe(name: &str, circuit: &Circuit) {
    println!("circuit {name}");
    for comp in circuit.components() {
        println!("  comp {} {} ({} inputs)", comp.id, comp.kind, comp.arity);
    }
    for input in circuit.inputs() {
        println!("  input {}[{}] = {}", input.name, input.index, u8::from(input.value));
    }
    for conn in circuit.connections() {
        println!("  connect {}[{}] -> {}[{}]", conn.from, conn.from_index, conn.to, conn.to_index);
    }
    match circuit.output() {
        Some(output) => println!("  output {}[{}]", output.id, output.index),
        None => println!("  no output set"),
    }
    for diagnostic in validate_circuit(circuit) {
        println!("  warning: {diagnostic}");
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("circuit_composer={level},composer={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
