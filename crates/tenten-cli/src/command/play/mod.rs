use std::{io, path::PathBuf};

use tenten_engine::{GameState, ShapeSeed};
use tenten_training::DEFAULT_HIDDEN_LAYERS;

use crate::{
    command::play::{app::PlayApp, screens::Screen},
    tui::Tui,
    util,
    view::{Drawer, Palette},
};

mod app;
mod prompt;
mod screens;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ManualPlayArg {
    /// Seed for the piece sequence; random when omitted
    #[clap(long)]
    seed: Option<u64>,
    /// Read moves as `SLOT X Y` lines instead of using the full-screen view
    #[clap(long)]
    console: bool,
    /// Draw the console view without colors
    #[clap(long)]
    no_color: bool,
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Path to a network file saved by `train`
    model_path: PathBuf,
    /// Hidden layer sizes of the saved network
    #[clap(long, value_delimiter = ',', default_values_t = DEFAULT_HIDDEN_LAYERS)]
    hidden: Vec<usize>,
    /// Seed for the piece sequence; random when omitted
    #[clap(long)]
    seed: Option<u64>,
    /// Moves per second
    #[clap(long, default_value_t = 4.0)]
    speed: f64,
}

fn shape_seed(seed: Option<u64>) -> ShapeSeed {
    seed.map_or_else(rand::random, ShapeSeed::from_u64)
}

pub(crate) fn run_manual(arg: &ManualPlayArg) -> anyhow::Result<()> {
    let ManualPlayArg {
        seed,
        console,
        no_color,
    } = arg;
    let seed = shape_seed(*seed);

    if *console {
        let palette = if *no_color {
            Palette::Plain
        } else {
            Palette::Colored
        };
        let mut game = GameState::with_seed(seed);
        prompt::play_lines(
            &mut game,
            io::stdin().lock(),
            &mut io::stdout().lock(),
            Drawer::new(1, palette),
        )?;
        eprintln!("Final score: {}", game.score());
        return Ok(());
    }

    let mut app = PlayApp::new(Screen::manual(seed));
    Tui::new().run(&mut app)
}

pub(crate) fn run_auto(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        model_path,
        hidden,
        seed,
        speed,
    } = arg;

    let network = util::read_network_file(model_path, hidden)?;
    log::info!("loaded network from {}", model_path.display());

    let mut app = PlayApp::new(Screen::auto(network, shape_seed(*seed), *speed));
    Tui::new().run(&mut app)
}
