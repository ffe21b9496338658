use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;
use std::process::{Command, Stdio};

pub fn generate_completions(shell: Shell) {
    let mut cmd = crate::Cli::command();
    generate(shell, &mut cmd, "gh-trending", &mut io::stdout());

    eprintln!();
    eprintln!("Save the output to the appropriate location for your shell:");
    match shell {
        Shell::Bash => {
            eprintln!("  gh-trending completions bash > ~/.local/share/bash-completion/completions/gh-trending");
        }
        Shell::Zsh => {
            eprintln!("  gh-trending completions zsh > ~/.zsh/completions/_gh-trending");
            eprintln!("  # (Add 'fpath=(~/.zsh/completions $fpath)' before 'compinit' in .zshrc)");
        }
        Shell::Fish => {
            eprintln!("  gh-trending completions fish > ~/.config/fish/completions/gh-trending.fish");
        }
        _ => {}
    }
}

fn browser_command(url: &str) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

/// Hand `url` to the platform's default browser.
pub fn open_in_browser(url: &str) -> io::Result<()> {
    let status = browser_command(url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::Other,
            format!("browser launcher exited with {}", status),
        ))
    }
}
