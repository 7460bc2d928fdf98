use clap::Subcommand;
use meditime_core::Theme;

use super::common;

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Set the theme explicitly
    Set {
        /// "light" or "dark"
        theme: String,
    },
}

pub fn run(action: ThemeAction) -> Result<(), Box<dyn std::error::Error>> {
    let storage = common::open_storage();

    match action {
        ThemeAction::Show => {
            println!("{}", name(Theme::load(&*storage)?));
        }
        ThemeAction::Toggle => {
            let theme = Theme::load(&*storage)?.toggled();
            theme.save(&*storage)?;
            println!("{}", name(theme));
        }
        ThemeAction::Set { theme } => {
            let theme = match theme.as_str() {
                "light" => Theme::Light,
                "dark" => Theme::Dark,
                other => return Err(format!("unknown theme: {other} (use light or dark)").into()),
            };
            theme.save(&*storage)?;
            println!("{}", name(theme));
        }
    }
    Ok(())
}

fn name(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    }
}
