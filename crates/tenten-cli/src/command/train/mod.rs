use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Context as _;
use chrono::Utc;
use tenten_neural::GenerationSummary;
use tenten_training::{Arena, TrainingConfig};

use self::{
    console::{Command, HELP},
    report::{GenerationRecord, TrainingReport},
};
use crate::{
    util::{self, Output},
    view::{Drawer, Palette},
};

mod console;
mod report;

const DEFAULT_GENERATIONS: usize = 100;
const DEFAULT_COLUMNS: usize = 3;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// JSON file with training settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of networks playing in parallel
    #[arg(long)]
    population: Option<usize>,
    /// Hidden layer sizes, e.g. `200,230,170,100,32`
    #[arg(long, value_delimiter = ',')]
    hidden: Option<Vec<usize>>,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many generations
    #[arg(long)]
    generations: Option<usize>,
    /// Stop once a network's fitness exceeds this value
    #[arg(long)]
    until_fitness: Option<f32>,
    /// Stop after this many seconds
    #[arg(long)]
    duration: Option<u64>,
    /// Network file to place in the last slot before training
    #[arg(long)]
    load: Option<PathBuf>,
    /// Where to save the top performing network at the end
    #[arg(long)]
    save: Option<PathBuf>,
    /// Control the run with commands read from stdin
    #[arg(long)]
    interactive: bool,
    /// Draw every game after each step
    #[arg(long)]
    show_boards: bool,
    /// Game windows per row when drawing
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    columns: usize,
    /// Draw without colors
    #[arg(long)]
    no_color: bool,
    /// Output file for the JSON training report; stdout when omitted
    #[arg(long)]
    report: Option<PathBuf>,
}

impl TrainArg {
    fn training_config(&self) -> anyhow::Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_training_config(path)?,
            None => TrainingConfig::default(),
        };
        if let Some(population) = self.population {
            config.population = population;
        }
        if let Some(hidden) = &self.hidden {
            config.hidden_layers.clone_from(hidden);
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }

    fn stop_condition(&self) -> StopCondition {
        let mut stop = StopCondition {
            generations: self.generations,
            fitness: self.until_fitness,
            deadline: self
                .duration
                .map(|secs| Instant::now() + Duration::from_secs(secs)),
            ..StopCondition::default()
        };
        if stop == StopCondition::default() {
            stop.generations = Some(DEFAULT_GENERATIONS);
        }
        stop
    }
}

/// Limits of a run; training stops as soon as any of them is reached.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct StopCondition {
    steps: Option<usize>,
    generations: Option<usize>,
    fitness: Option<f32>,
    deadline: Option<Instant>,
}

impl StopCondition {
    fn from_command(command: &Command) -> Option<Self> {
        let stop = match command {
            Command::Steps(steps) => Self {
                steps: Some(*steps),
                ..Self::default()
            },
            Command::Generations(generations) => Self {
                generations: Some(*generations),
                ..Self::default()
            },
            Command::NextGeneration => Self {
                generations: Some(1),
                ..Self::default()
            },
            Command::UntilFitness(fitness) => Self {
                fitness: Some(*fitness),
                ..Self::default()
            },
            Command::RunFor(duration) => Self {
                deadline: Some(Instant::now() + *duration),
                ..Self::default()
            },
            _ => return None,
        };
        Some(stop)
    }

    fn is_reached(&self, steps: usize, generations: usize, best_fitness: f32) -> bool {
        self.steps.is_some_and(|limit| steps >= limit)
            || self.generations.is_some_and(|limit| generations >= limit)
            || self.fitness.is_some_and(|limit| best_fitness > limit)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Drives an [`Arena`] and keeps what the report needs.
#[derive(Debug)]
struct Trainer {
    arena: Arena,
    history: Vec<GenerationRecord>,
    drawer: Drawer,
    draw_every_step: bool,
}

impl Trainer {
    fn new(config: &TrainingConfig, drawer: Drawer, draw_every_step: bool) -> anyhow::Result<Self> {
        let arena = Arena::new(config).context("Invalid training configuration")?;
        Ok(Self {
            arena,
            history: Vec::new(),
            drawer,
            draw_every_step,
        })
    }

    /// Steps the arena until `stop` is reached.
    fn run<W>(&mut self, stop: StopCondition, out: &mut W) -> anyhow::Result<()>
    where
        W: Write,
    {
        let (mut steps, mut generations) = (0, 0);
        while !stop.is_reached(steps, generations, self.arena.best_fitness()) {
            if let Some(summary) = self.arena.step() {
                self.record(&summary);
                generations += 1;
            }
            steps += 1;
            if self.draw_every_step {
                self.draw(out)?;
            }
        }
        Ok(())
    }

    fn record(&mut self, summary: &GenerationSummary) {
        let fitness = summary.fitness;
        eprintln!(
            "Generation #{}: max {:.1} | mean {:.1} | median {:.1} | min {:.1} | std dev {:.1}",
            summary.generation, fitness.max, fitness.mean, fitness.median, fitness.min, fitness.std_dev,
        );
        self.history.push(GenerationRecord::from(summary));
    }

    fn draw<W>(&self, out: &mut W) -> anyhow::Result<()>
    where
        W: Write,
    {
        let mut text = self.drawer.draw_games(self.arena.games());
        text.push_str(&format!("Generation: {}\n", self.arena.generation()));
        self.drawer
            .redraw(out, &text)
            .context("Failed to draw the games")
    }

    fn save(&self, path: &Path) -> anyhow::Result<()> {
        self.arena
            .manager()
            .save_top_performer(path)
            .with_context(|| format!("Failed to save network to {}", path.display()))
    }

    fn load(&mut self, path: &Path) -> anyhow::Result<()> {
        self.arena
            .manager_mut()
            .load_into(path)
            .with_context(|| format!("Failed to load network from {}", path.display()))
    }

    /// Reads commands from `input` until `exit` or the end of the input.
    fn console<R, W>(&mut self, mut input: R, out: &mut W) -> anyhow::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        let mut line = String::new();
        loop {
            self.draw(out)?;
            write!(out, "Command: ")?;
            out.flush()?;
            line.clear();
            if input.read_line(&mut line).context("Failed to read command")? == 0 {
                return Ok(());
            }

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    writeln!(out, "{e}")?;
                    continue;
                }
            };
            if let Some(stop) = StopCondition::from_command(&command) {
                self.run(stop, out)?;
                continue;
            }
            let result = match command {
                Command::Exit => return Ok(()),
                Command::Help => {
                    writeln!(out, "{HELP}")?;
                    Ok(())
                }
                Command::Drawing(enabled) => {
                    self.draw_every_step = enabled;
                    Ok(())
                }
                Command::Save(path) => self.save(&path),
                Command::Load(path) => self.load(&path),
                _ => Ok(()),
            };
            if let Err(e) = result {
                writeln!(out, "{e:#}")?;
            }
        }
    }

    fn report(&self, config: TrainingConfig, saved_to: Option<PathBuf>) -> TrainingReport {
        TrainingReport {
            trained_at: Utc::now(),
            layer_sizes: self.arena.manager().layer_sizes().to_vec(),
            generations_completed: self.arena.generation(),
            best_fitness: self.arena.best_fitness(),
            saved_to,
            config,
            history: self.history.clone(),
        }
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let config = arg.training_config()?;
    let palette = if arg.no_color {
        Palette::Plain
    } else {
        Palette::Colored
    };
    let mut trainer = Trainer::new(
        &config,
        Drawer::new(arg.columns, palette),
        arg.show_boards,
    )?;
    eprintln!(
        "Training {} networks with layers {:?}",
        config.population,
        trainer.arena.manager().layer_sizes()
    );

    if let Some(path) = &arg.load {
        trainer.load(path)?;
        eprintln!("Loaded network from {}", path.display());
    }

    if arg.interactive {
        trainer.console(io::stdin().lock(), &mut io::stdout().lock())?;
    } else {
        trainer.run(arg.stop_condition(), &mut io::stderr().lock())?;
    }

    if let Some(path) = &arg.save {
        trainer.save(path)?;
        eprintln!("Top performer saved to {}", path.display());
    }

    let report = trainer.report(config, arg.save.clone());
    Output::save_json(&report, arg.report.clone())?;

    eprintln!();
    eprintln!("Training completed");
    eprintln!("  Generations: {}", report.generations_completed);
    eprintln!("  Best fitness: {:.1}", report.best_fitness);
    if let Some(path) = &arg.report {
        eprintln!("  Report: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn small_config() -> TrainingConfig {
        TrainingConfig {
            population: 4,
            hidden_layers: vec![6],
            seed: Some(21),
            ..TrainingConfig::default()
        }
    }

    fn trainer() -> Trainer {
        Trainer::new(&small_config(), Drawer::new(2, Palette::Plain), false).unwrap()
    }

    #[test]
    fn test_stop_condition() {
        let stop = StopCondition {
            steps: Some(5),
            fitness: Some(10.0),
            ..StopCondition::default()
        };
        assert!(!stop.is_reached(4, 0, 10.0));
        assert!(stop.is_reached(5, 0, 0.0));
        assert!(stop.is_reached(1, 0, 10.5));

        let past = StopCondition {
            deadline: Some(Instant::now()),
            ..StopCondition::default()
        };
        assert!(past.is_reached(0, 0, 0.0));
        assert!(!StopCondition::default().is_reached(100, 100, 100.0));
    }

    #[test]
    fn test_default_stop_is_generation_limit() {
        let arg = TrainArg::default();
        assert_eq!(arg.stop_condition().generations, Some(DEFAULT_GENERATIONS));

        let arg = TrainArg {
            until_fitness: Some(50.0),
            ..TrainArg::default()
        };
        let stop = arg.stop_condition();
        assert_eq!(stop.generations, None);
        assert_eq!(stop.fitness, Some(50.0));
    }

    #[test]
    fn test_flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.json");
        std::fs::write(&path, r#"{ "population": 8, "seed": 3 }"#).unwrap();

        let arg = TrainArg {
            config: Some(path),
            hidden: Some(vec![12, 4]),
            seed: Some(9),
            ..TrainArg::default()
        };
        let config = arg.training_config().unwrap();
        assert_eq!(config.population, 8);
        assert_eq!(config.hidden_layers, [12, 4]);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_run_generations_records_history() {
        let mut trainer = trainer();
        let stop = StopCondition {
            generations: Some(3),
            ..StopCondition::default()
        };
        trainer.run(stop, &mut io::sink()).unwrap();

        assert_eq!(trainer.arena.generation(), 3);
        let generations = trainer
            .history
            .iter()
            .map(|r| r.generation)
            .collect::<Vec<_>>();
        assert_eq!(generations, [0, 1, 2]);
    }

    #[test]
    fn test_zero_limit_runs_nothing() {
        let mut trainer = trainer();
        let stop = StopCondition::from_command(&Command::Steps(0)).unwrap();
        trainer.run(stop, &mut io::sink()).unwrap();
        let stop = StopCondition::from_command(&Command::Generations(0)).unwrap();
        trainer.run(stop, &mut io::sink()).unwrap();

        assert!(trainer.arena.games().iter().all(|g| g.score() == 0));
        assert_eq!(trainer.arena.generation(), 0);
        assert!(trainer.history.is_empty());
    }

    #[test]
    fn test_console_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.neural");
        let input = format!(
            "s 3\nbogus\nng\nhelp\nsave {}\nload {}\ne\ns 100\n",
            path.display(),
            path.display()
        );
        let mut out = Vec::new();

        let mut trainer = trainer();
        trainer.console(Cursor::new(input), &mut out).unwrap();

        // `ng` always finishes a generation; `s 3` may or may not have
        assert!(trainer.arena.generation() >= 1);
        assert_eq!(trainer.history.len(), trainer.arena.generation());
        assert!(path.exists());
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("unknown command `bogus`"));
        assert!(out.contains("ng              - run until the next generation"));
        assert!(out.contains("Neural Network: 3"));
        assert!(out.contains(&format!("Generation: {}", trainer.arena.generation())));
    }

    #[test]
    fn test_console_reports_failed_load() {
        let dir = tempfile::tempdir().unwrap();
        let input = format!("load {}\n", dir.path().join("missing").display());
        let mut out = Vec::new();

        trainer().console(Cursor::new(input), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Failed to load network from"));
    }

    #[test]
    fn test_report_contents() {
        let mut trainer = trainer();
        let stop = StopCondition {
            generations: Some(2),
            ..StopCondition::default()
        };
        trainer.run(stop, &mut io::sink()).unwrap();

        let report = trainer.report(small_config(), None);
        assert_eq!(report.layer_sizes, [175, 6, 3]);
        assert_eq!(report.generations_completed, 2);
        assert_eq!(report.history.len(), 2);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["config"]["population"], 4);
        assert_eq!(json["history"][1]["generation"], 1);
        assert!(json["trained_at"].is_string());
    }
}
