use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use project_bump::config;
use project_bump::domain::{NamedScheme, VersionPart};
use project_bump::project::FsProjectAdapter;
use project_bump::solution::{find_containing_solution, Solution};
use project_bump::ui;
use project_bump::updater::VersionUpdater;

#[derive(clap::Parser)]
#[command(
    name = "project-bump",
    about = "Increase project versions across a solution and propagate to dependants"
)]
struct Args {
    #[arg(help = "Paths to the project files to update")]
    projects: Vec<PathBuf>,

    #[arg(
        short,
        long,
        help = "Path to the solution file the project(s) belong to. If omitted the next solution file relative to the first project path is used"
    )]
    solution: Option<PathBuf>,

    #[arg(
        short,
        long,
        default_value = "major",
        help = "Which version part to increase: major, minor or patch"
    )]
    update: VersionPart,

    #[arg(short, long, help = "Make the version update a prerelease")]
    prerelease: bool,

    #[arg(
        short,
        long,
        help = "Custom name for the prerelease label. If omitted the configured scheme name is used"
    )]
    name: Option<String>,

    #[arg(
        short,
        long,
        help = "Also update all projects which are (transitively) dependent on the updated projects"
    )]
    dependants: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Preview what would happen without writing project files")]
    dry_run: bool,

    #[arg(short = 'v', long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("project-bump {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.projects.is_empty() {
        ui::display_error("No project paths given");
        std::process::exit(1);
    }

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    // Resolve the given paths so they match the solution's canonical view
    let mut project_paths = Vec::new();
    for path in &args.projects {
        match std::fs::canonicalize(path) {
            Ok(resolved) => project_paths.push(resolved),
            Err(e) => {
                ui::display_error(&format!(
                    "Cannot resolve project path '{}': {}",
                    path.display(),
                    e
                ));
                std::process::exit(1);
            }
        }
    }

    // Locate the solution file
    let solution_path = match &args.solution {
        Some(path) => path.clone(),
        None => {
            match find_containing_solution(&project_paths[0], config.solution.search_depth) {
                Ok(path) => path,
                Err(e) => {
                    ui::display_error(&e.to_string());
                    std::process::exit(1);
                }
            }
        }
    };

    ui::display_status(&format!("Loading solution '{}'", solution_path.display()));
    let solution = match Solution::load(&solution_path) {
        Ok(solution) => solution,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };
    ui::display_success(&format!(
        "Loaded {} project(s) from '{}'",
        solution.projects().len(),
        solution.path().display()
    ));

    let graph = match solution.dependency_graph() {
        Ok(graph) => graph,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    // Prerelease scheme: CLI name wins over the configured one
    let scheme_name = args
        .name
        .clone()
        .unwrap_or_else(|| config.prerelease.name.clone());
    let scheme = match NamedScheme::with_recognized(scheme_name.as_str(), &config.prerelease.recognized) {
        Ok(scheme) => scheme,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };
    if args.prerelease {
        ui::display_status(&format!("Using prerelease scheme '{}'", scheme.name()));
    }

    let adapter = if args.dry_run {
        FsProjectAdapter::dry_run()
    } else {
        FsProjectAdapter::new()
    };

    let mut updater = VersionUpdater::for_paths(
        &solution,
        &graph,
        &project_paths,
        Box::new(scheme),
        adapter,
    );

    if updater.target_ids().is_empty() {
        ui::display_error("None of the given paths matches a project in the solution");
        std::process::exit(1);
    }

    let targets: Vec<&str> = updater.target_ids().iter().map(|id| id.as_str()).collect();
    ui::display_status(&format!(
        "Increasing {} version of: {}",
        args.update,
        targets.join(", ")
    ));

    let changes = match updater.increase_version(args.update, args.prerelease) {
        Ok(changes) => changes,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };
    ui::display_changes("Updated projects:", &changes);

    if args.dependants {
        let dependant_changes = match updater.increase_dependants_version() {
            Ok(changes) => changes,
            Err(e) => {
                ui::display_error(&e.to_string());
                std::process::exit(1);
            }
        };
        ui::display_changes("Updated dependants:", &dependant_changes);
    }

    if args.dry_run {
        ui::display_dry_run_notice();
    } else {
        ui::display_success("All version updates written");
    }

    Ok(())
}
