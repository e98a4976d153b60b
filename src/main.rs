//! Command line interface for the gem hunter solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gem_hunter::{
    config::{CliOverrides, Settings, Strategy},
    puzzle::io::{create_example_grids, load_grid_from_file, load_solved_grid_from_file},
    solve::{HuntProblem, SolutionValidator},
    utils::{ColorOutput, SolutionFormatter},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gem_hunter")]
#[command(about = "Trap-hunting puzzle solver")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a puzzle with the configured strategy
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,

        /// Solving strategy (overrides config)
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Brute-force variable ceiling (overrides config)
        #[arg(long)]
        ceiling: Option<usize>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run every strategy over the same puzzle and check they agree
    Compare {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,
    },

    /// Check a solved grid against its puzzle
    Validate {
        /// Puzzle file
        #[arg(short, long)]
        puzzle: PathBuf,

        /// Solved grid file (clue digits plus T/G labels)
        #[arg(short, long)]
        solution: PathBuf,
    },

    /// Create example configuration and puzzle files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Backtracking,
    BruteForce,
    Sat,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Backtracking => Strategy::Backtracking,
            StrategyArg::BruteForce => Strategy::BruteForce,
            StrategyArg::Sat => Strategy::Sat,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            puzzle,
            strategy,
            ceiling,
            output,
            verbose,
        } => solve_command(config, puzzle, strategy, ceiling, output, verbose),
        Commands::Compare { config, puzzle } => compare_command(config, puzzle),
        Commands::Validate { puzzle, solution } => validate_command(puzzle, solution),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn solve_command(
    config_path: PathBuf,
    puzzle_file: Option<PathBuf>,
    strategy: Option<StrategyArg>,
    ceiling: Option<usize>,
    output_dir: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("Solving gem hunter puzzle"));

    let mut settings = load_settings(&config_path)?;

    let cli_overrides = CliOverrides {
        puzzle_file,
        strategy: strategy.map(Strategy::from),
        brute_force_ceiling: ceiling,
        output_dir,
    };
    settings.merge_with_cli(&cli_overrides);

    settings
        .validate()
        .context("Configuration validation failed")?;

    let problem = HuntProblem::new(settings.clone()).context("Failed to create puzzle problem")?;

    if verbose {
        println!(
            "Puzzle ({}x{}), strategy {}:",
            problem.grid().height,
            problem.grid().width,
            settings.solver.strategy
        );
        println!("{}", problem.grid());
        println!("{}", problem.context().constraints().statistics());
    }

    let report = problem.solve().context("Failed to solve puzzle")?;

    if report.outcome.satisfiable {
        println!("{}", ColorOutput::success("Solution found"));
    } else {
        println!("{}", ColorOutput::warning("No solution exists"));
    }
    println!("{}", SolutionFormatter::format_report(&report));

    if settings.output.save_solution {
        if let Some(solution) = &report.solution {
            SolutionFormatter::save_solution(
                solution,
                &settings.output.output_directory,
                &settings.output.format,
            )
            .context("Failed to save solution")?;
            println!(
                "{}",
                ColorOutput::success(&format!(
                    "Solution saved to {}",
                    settings.output.output_directory.display()
                ))
            );
        }
    }

    Ok(())
}

fn compare_command(config_path: PathBuf, puzzle_file: Option<PathBuf>) -> Result<()> {
    println!("{}", ColorOutput::info("Comparing solving strategies"));

    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&CliOverrides {
        puzzle_file,
        ..Default::default()
    });
    settings
        .validate()
        .context("Configuration validation failed")?;

    let problem = HuntProblem::new(settings).context("Failed to create puzzle problem")?;
    let comparison = problem.compare().context("Strategy comparison failed")?;

    println!("{}", SolutionFormatter::format_comparison(&comparison));

    if let Some(report) = comparison.reports.iter().find(|r| r.solution.is_some()) {
        println!("Solution ({}):", report.strategy);
        println!("{}", report.solution.as_ref().unwrap().render());
    }

    if !comparison.agreed {
        anyhow::bail!("strategies disagreed on satisfiability");
    }
    Ok(())
}

fn validate_command(puzzle_path: PathBuf, solution_path: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("Validating solution"));

    let grid = load_grid_from_file(&puzzle_path)
        .with_context(|| format!("Failed to load puzzle from {}", puzzle_path.display()))?;
    let rows = load_solved_grid_from_file(&solution_path)
        .with_context(|| format!("Failed to load solution from {}", solution_path.display()))?;

    let assignment = SolutionValidator::assignment_from_solved_rows(&grid, &rows)
        .context("Solution does not fit the puzzle")?;
    let result = SolutionValidator::validate(&grid, &assignment);

    println!("{}", result);
    if result.is_valid {
        println!("{}", ColorOutput::success("Solution is valid"));
    } else {
        println!("{}", ColorOutput::error("Solution is invalid"));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure"));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/puzzles");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        let default_settings = Settings::default();
        default_settings
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_grids(&input_dir).context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", input_dir.display());

    // Configuration variants for the other strategies.
    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut sat_config = Settings::default();
    sat_config.solver.strategy = Strategy::Sat;
    sat_config.to_file(&examples_dir.join("sat.yaml"))?;

    let mut brute_config = Settings::default();
    brute_config.solver.strategy = Strategy::BruteForce;
    brute_config.input.puzzle_file = PathBuf::from("input/puzzles/pocket.txt");
    brute_config.to_file(&examples_dir.join("brute_force.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());
    println!("\n{}", ColorOutput::success("Setup complete"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your puzzles to {}", input_dir.display());
    println!("3. Run: cargo run -- solve --config config/default.yaml");

    Ok(())
}
