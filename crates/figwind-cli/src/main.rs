use clap::{Parser, Subcommand};
use std::path::Path;

use figwind_codegen::GenerateOptions;
use figwind_scene::SceneNode;

#[derive(Parser)]
#[command(name = "figwind")]
#[command(about = "Figwind — scene-graph to utility-class markup generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a .svelte file from a scene JSON export
    Build {
        /// Input scene .json file
        path: String,

        /// Prefix class attributes with the sanitized layer name
        #[arg(long)]
        show_layer_name: bool,
    },

    /// Check a scene JSON export for errors without generating output
    Check {
        /// Input scene .json file
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Build { path, show_layer_name } => cmd_build(&path, show_layer_name),
        Command::Check { path } => cmd_check(&path),
    }
}

fn read_scene(path: &str) -> String {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn restructure(json: &str) -> Vec<SceneNode> {
    let raw = match figwind_scene::parse_scene(json) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let nodes = figwind_scene::convert_nodes(&raw);
    match figwind_layout::restructure(nodes) {
        Ok(nodes) => nodes,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn cmd_build(path: &str, show_layer_name: bool) {
    let json = read_scene(path);
    let nodes = restructure(&json);

    let options = GenerateOptions {
        show_layer_name,
        ignore_stack_parent: None,
    };
    let markup = figwind_codegen::generate(&nodes, &options);

    // Write the output next to the source
    let stem = Path::new(path).file_stem().unwrap().to_str().unwrap();
    let dir = Path::new(path).parent().unwrap_or(Path::new("."));
    let out_path = dir.join(format!("{stem}.svelte"));

    if let Err(e) = std::fs::write(&out_path, &markup) {
        eprintln!("Error writing {}: {e}", out_path.display());
        std::process::exit(1);
    }

    eprintln!("Built: {}", out_path.display());
}

fn cmd_check(path: &str) {
    let json = read_scene(path);
    let nodes = restructure(&json);

    // Run the generator too so emission problems surface here, not at build.
    let _ = figwind_codegen::generate(&nodes, &GenerateOptions::default());

    eprintln!("OK: {path}");
}
