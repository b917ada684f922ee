// CypherSynth - Schema-driven Cypher training data synthesis
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shell completion generation

use crate::error::CliError;
use clap::Command;
use clap_complete::{generate, Generator};
use std::io;

const BIN: &str = "cyphersynth";

/// Write the completion script for `cmd` to stdout.
pub fn generate_completion_for_command<G: Generator>(
    generator: G,
    cmd: &mut Command,
) -> Result<(), CliError> {
    generate(generator, cmd, cmd.get_name().to_string(), &mut io::stdout());
    Ok(())
}

/// Shell-specific instructions for installing completions.
///
/// Shell names are case-insensitive.
///
/// ```
/// use cyphersynth_cli::commands::print_installation_instructions;
///
/// assert!(print_installation_instructions("Zsh").contains("_cyphersynth"));
/// assert_eq!(print_installation_instructions("tcsh"), "Unsupported shell");
/// ```
pub fn print_installation_instructions(shell: &str) -> String {
    let shell = shell.to_lowercase();
    let (session, persist) = match shell.as_str() {
        "bash" => (
            format!("eval \"$({BIN} completion bash)\""),
            format!("{BIN} completion bash > ~/.local/share/bash-completion/completions/{BIN}"),
        ),
        "zsh" => (
            format!("eval \"$({BIN} completion zsh)\""),
            format!("{BIN} completion zsh > ~/.zsh/completions/_{BIN}  # directory must be in $fpath"),
        ),
        "fish" => (
            format!("{BIN} completion fish | source"),
            format!("{BIN} completion fish > ~/.config/fish/completions/{BIN}.fish"),
        ),
        "powershell" | "pwsh" => (
            format!("{BIN} completion powershell | Out-String | Invoke-Expression"),
            format!("Add '{BIN} completion powershell | Out-String | Invoke-Expression' to $PROFILE"),
        ),
        "elvish" => (
            format!("eval ({BIN} completion elvish)"),
            format!("Add 'eval ({BIN} completion elvish)' to ~/.elvish/rc.elv"),
        ),
        _ => return "Unsupported shell".to_string(),
    };

    format!(
        "# {} completion installation:\n\n# For current session only:\n{}\n\n# For persistent installation:\n{}\n",
        shell, session, persist
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installation_instructions_mention_shell() {
        for shell in ["bash", "zsh", "fish", "powershell", "elvish"] {
            let instructions = print_installation_instructions(shell);
            assert!(instructions.contains(shell), "{}", shell);
            assert!(instructions.contains("cyphersynth completion"), "{}", shell);
        }
    }

    #[test]
    fn test_installation_instructions_case_insensitive() {
        assert_eq!(
            print_installation_instructions("bash"),
            print_installation_instructions("BASH")
        );
    }

    #[test]
    fn test_pwsh_alias() {
        assert_eq!(
            print_installation_instructions("pwsh").replace("pwsh", "powershell"),
            print_installation_instructions("powershell")
        );
    }

    #[test]
    fn test_installation_instructions_unsupported() {
        assert_eq!(print_installation_instructions("invalid"), "Unsupported shell");
    }
}
