use clap::{ArgAction, Parser, ValueEnum};
use snake_core::GameConfig;
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Half-block characters in the current terminal
    Terminal,
    /// A native window
    Window,
}

#[derive(Parser, Debug)]
#[command(
    name = "snake",
    about = "Grid Snake - steer with the arrow keys, Escape quits",
    long_about = "Grid Snake draws a cell grid into a frame buffer and copies only the changed cells to the screen.\n\
                  Settings come from a JSON config file and can be overridden on the command line.",
    version
)]
pub struct Cli {
    /// Where to draw the game
    #[arg(short = 'b', long, value_enum, default_value_t = Backend::Terminal)]
    pub backend: Backend,

    /// Grid columns
    #[arg(long)]
    pub cols: Option<u32>,

    /// Grid rows
    #[arg(long)]
    pub rows: Option<u32>,

    /// Simulation ticks per second
    #[arg(short = 'r', long)]
    pub rate: Option<u32>,

    /// Food placement seed (hex with 0x prefix or decimal)
    #[arg(short = 's', long)]
    pub seed: Option<String>,

    /// Text scale for the HUD and messages (terminal default: 1)
    #[arg(long)]
    pub scale: Option<u32>,

    /// Window width in pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value = "600")]
    pub height: u32,

    /// Config file (default: $XDG_CONFIG_HOME/snake/config.json)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Layer the command line flags over `config`
    pub fn apply(&self, config: &mut GameConfig) -> Result<(), String> {
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(rate) = self.rate {
            config.tick_rate = rate;
        }
        if let Some(seed) = &self.seed {
            config.seed = parse_seed(seed)?;
        }
        match self.scale {
            Some(scale) => config.text_scale = scale,
            // a terminal pixel is half a character, scale 2 would eat the screen
            None if self.backend == Backend::Terminal => config.text_scale = 1,
            None => {}
        }
        Ok(())
    }
}

/// Parse a seed from string (hex or decimal)
pub fn parse_seed(s: &str) -> Result<u32, String> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|_| format!("Invalid hex seed: {s}"))
    } else {
        s.parse().map_err(|_| format!("Invalid seed: {s}"))
    }
}
