//! # Shell Completion Module
//!
//! This module provides shell completion functionality for Curator, including:
//! - Generation of completion scripts for various shells
//! - Mood name completion for the `mood` command
//! - Integration with clap's completion system
//!
//! ## Usage
//!
//! ```bash
//! # Generate bash completions
//! curator completion bash > ~/.local/share/bash-completion/completions/curator
//!
//! # Generate fish completions with mood names
//! curator completion-enhanced fish > ~/.config/fish/completions/curator.fish
//! ```

use crate::profile;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io;

/// Generate shell completions for the given shell
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Map the CLI's shell selection onto clap_complete's
#[must_use]
pub fn shell_to_completion_shell(shell: &crate::cli::Shell) -> CompletionShell {
    match shell {
        crate::cli::Shell::Bash => CompletionShell::Bash,
        crate::cli::Shell::Zsh => CompletionShell::Zsh,
        crate::cli::Shell::Fish => CompletionShell::Fish,
        crate::cli::Shell::PowerShell => CompletionShell::PowerShell,
        crate::cli::Shell::Elvish => CompletionShell::Elvish,
    }
}

/// Mood names offered for completion
#[must_use]
pub fn get_mood_completions() -> Vec<&'static str> {
    profile::mood_names()
}

/// Print mood names one per line (used by the hidden `complete-moods` command)
pub fn print_mood_completions() {
    for mood in get_mood_completions() {
        println!("{mood}");
    }
}

/// Enhanced fish completion script with mood name completion
#[must_use]
pub fn enhanced_fish_completion() -> String {
    let mut script = String::from(
        r#"# Enhanced Curator completion script for Fish shell with mood name completion
# Install with: curator completion-enhanced fish > ~/.config/fish/completions/curator.fish

complete -c curator -e

complete -c curator -l json -d 'Print results as JSON'
complete -c curator -l token -d 'Catalog access token' -r
complete -c curator -l config -d 'Configuration file' -r -F
complete -c curator -s v -l verbose -d 'Enable debug logging'

complete -c curator -f -n '__fish_is_first_token' -a 'mood' -d 'Generate a playlist matching a mood'
complete -c curator -f -n '__fish_is_first_token' -a 'genre' -d 'Generate a playlist from a genre'
complete -c curator -f -n '__fish_is_first_token' -a 'artist' -d 'Generate a playlist around an artist'
complete -c curator -f -n '__fish_is_first_token' -a 'smart' -d 'Generate recommendations from seed tracks'
complete -c curator -f -n '__fish_is_first_token' -a 'analyze' -d 'Analyze an existing playlist'
complete -c curator -f -n '__fish_is_first_token' -a 'search' -d 'Search the catalog for tracks'
complete -c curator -f -n '__fish_is_first_token' -a 'features' -d 'Show raw audio features for tracks'
complete -c curator -f -n '__fish_is_first_token' -a 'moods' -d 'List available moods'
complete -c curator -f -n '__fish_is_first_token' -a 'completion' -d 'Generate shell completions'
complete -c curator -f -n '__fish_is_first_token' -a 'completion-enhanced' -d 'Generate enhanced shell completions'

complete -c curator -f -n '__fish_seen_subcommand_from artist' -l no-related -d 'Only use the artist own top tracks'
complete -c curator -f -n '__fish_seen_subcommand_from mood genre artist smart search' -s n -l limit -d 'Number of tracks' -r
"#,
    );

    for mood in get_mood_completions() {
        script.push_str(&format!(
            "complete -c curator -f -n '__fish_seen_subcommand_from mood' -a '{mood}' -d 'Mood profile'\n"
        ));
    }

    script
}

/// Enhanced bash completion script with mood name completion
#[must_use]
pub fn enhanced_bash_completion() -> String {
    let moods = get_mood_completions().join(" ");
    format!(
        r#"# Enhanced Curator completion script for Bash with mood name completion
# Install with: curator completion-enhanced bash > ~/.local/share/bash-completion/completions/curator

_curator() {{
    local cur prev commands
    COMPREPLY=()
    cur="${{COMP_WORDS[COMP_CWORD]}}"
    prev="${{COMP_WORDS[COMP_CWORD-1]}}"
    commands="mood genre artist smart analyze search features moods completion completion-enhanced"

    if [[ ${{COMP_CWORD}} -eq 1 ]]; then
        COMPREPLY=( $(compgen -W "${{commands}} --json --token --config --verbose" -- "${{cur}}") )
        return 0
    fi

    case "${{prev}}" in
        mood)
            COMPREPLY=( $(compgen -W "{moods}" -- "${{cur}}") )
            return 0
            ;;
        completion|completion-enhanced)
            COMPREPLY=( $(compgen -W "bash zsh fish power-shell elvish" -- "${{cur}}") )
            return 0
            ;;
        --config)
            COMPREPLY=( $(compgen -f -- "${{cur}}") )
            return 0
            ;;
    esac

    COMPREPLY=( $(compgen -W "--limit --json --no-related" -- "${{cur}}") )
}}

complete -F _curator curator
"#
    )
}
