/// Token separating mgit's own arguments from the git command line.
pub const SEPARATOR: &str = "--";

/// Raw command line split into mgit's arguments and the arguments forwarded to git.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationArgs {
    /// Arguments parsed by mgit itself (directories, filtering flags)
    pub script_args: Vec<String>,

    /// Arguments handed to git unchanged, for every repository
    pub passthrough_args: Vec<String>,
}

impl InvocationArgs {
    /// Split the arguments following the program name.
    ///
    /// Only the first `--` separates; any later `--` is forwarded to git.
    /// Without a separator everything goes to git and the current directory
    /// is the root, except a help or version request, which stays with mgit.
    ///
    /// ```
    /// use mgit::domain::value_objects::invocation_args::InvocationArgs;
    ///
    /// let args = InvocationArgs::split(["SRC", "--", "fetch", "--all"]);
    /// assert_eq!(args.script_args, vec!["SRC"]);
    /// assert_eq!(args.passthrough_args, vec!["fetch", "--all"]);
    /// ```
    pub fn split<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args: Vec<String> = args.into_iter().map(Into::into).collect();

        match args.iter().position(|arg| arg == SEPARATOR) {
            Some(index) => {
                let passthrough_args = args.split_off(index + 1);
                args.truncate(index);
                Self {
                    script_args: args,
                    passthrough_args,
                }
            }
            None if Self::asks_for_mgit_itself(&args) => Self {
                script_args: args,
                passthrough_args: Vec::new(),
            },
            None => Self {
                script_args: Vec::new(),
                passthrough_args: args,
            },
        }
    }

    /// Whether there is anything to forward to git.
    pub fn has_git_command(&self) -> bool {
        !self.passthrough_args.is_empty()
    }

    fn asks_for_mgit_itself(args: &[String]) -> bool {
        if args.iter().any(|arg| arg == "-h" || arg == "--help") {
            return true;
        }
        matches!(args, [only] if only == "-V" || only == "--version")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_on_separator() {
        let args = InvocationArgs::split(["SRC", "--", "fetch", "--all"]);
        assert_eq!(args.script_args, vec!["SRC".to_string()]);
        assert_eq!(
            args.passthrough_args,
            vec!["fetch".to_string(), "--all".to_string()]
        );
    }

    #[test]
    fn test_no_separator_forwards_everything() {
        let args = InvocationArgs::split(["fetch"]);
        assert!(args.script_args.is_empty());
        assert_eq!(args.passthrough_args, vec!["fetch".to_string()]);
        assert!(args.has_git_command());
    }

    #[test]
    fn test_only_first_separator_splits() {
        let args = InvocationArgs::split(["-I", "--", "checkout", "--", "README.md"]);
        assert_eq!(args.script_args, vec!["-I".to_string()]);
        assert_eq!(
            args.passthrough_args,
            vec![
                "checkout".to_string(),
                "--".to_string(),
                "README.md".to_string()
            ]
        );
    }

    #[test]
    fn test_tokens_are_kept_verbatim() {
        let args = InvocationArgs::split(["--", "commit", "-m", "two  spaces # not a comment"]);
        assert_eq!(args.passthrough_args[2], "two  spaces # not a comment");
    }

    #[test]
    fn test_trailing_separator_leaves_no_git_command() {
        let args = InvocationArgs::split(["-F", "--"]);
        assert_eq!(args.script_args, vec!["-F".to_string()]);
        assert!(!args.has_git_command());
    }

    #[test]
    fn test_help_without_separator_stays_with_mgit() {
        let args = InvocationArgs::split(["--help"]);
        assert_eq!(args.script_args, vec!["--help".to_string()]);
        assert!(args.passthrough_args.is_empty());

        let args = InvocationArgs::split(["-V"]);
        assert_eq!(args.script_args, vec!["-V".to_string()]);
    }

    #[test]
    fn test_version_flag_with_other_tokens_goes_to_git() {
        let args = InvocationArgs::split(["describe", "--version"]);
        assert!(args.script_args.is_empty());
        assert_eq!(args.passthrough_args.len(), 2);
    }

    #[test]
    fn test_empty_command_line() {
        let args = InvocationArgs::split(Vec::<String>::new());
        assert_eq!(args, InvocationArgs::default());
        assert!(!args.has_git_command());
    }
}
