use crate::api::{Shell, SystemInfo};

/// Shell named by a `SHELL` path such as `/usr/bin/zsh`
pub fn shell_from_path(path: &str) -> Option<Shell> {
    if path.ends_with("/zsh") {
        Some(Shell::Zsh)
    } else if path.ends_with("/bash") {
        Some(Shell::Bash)
    } else {
        None
    }
}

/// Absolute path of the shell's init file
pub fn shell_init_file(shell: Shell) -> Option<String> {
    let relative = match shell {
        Shell::Bash => ".bashrc",
        Shell::Zsh => ".zshrc",
    };
    dirs::home_dir().map(|home| home.join(relative).display().to_string())
}

pub fn get_system_info() -> SystemInfo {
    let shell = std::env::var("SHELL")
        .ok()
        .as_deref()
        .and_then(shell_from_path);
    SystemInfo {
        shell,
        shell_init_file: shell.and_then(shell_init_file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_from_path() {
        assert_eq!(shell_from_path("/bin/zsh"), Some(Shell::Zsh));
        assert_eq!(shell_from_path("/usr/bin/bash"), Some(Shell::Bash));
        assert_eq!(shell_from_path("/usr/bin/fish"), None);
    }

    #[test]
    fn test_can_predict_shell_init() {
        if let Some(init_file) = shell_init_file(Shell::Zsh) {
            assert!(init_file.starts_with('/'));
            assert!(init_file.ends_with("/.zshrc"));
        }
    }
}
