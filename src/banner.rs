//! Startup banner and session summary display.

use std::path::Path;

use crate::consts::{AUTHOR, HOMEPAGE, REPO};

/// Session configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub root: &'a Path,
    pub model: &'a str,
    pub auth_status: &'a str,
    pub formatter: &'a str,
}

/// Print the startup banner with session info.
pub fn print_banner(info: &BannerInfo) {
    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║          D A T A W R I G H T          ║
   ║    one sentence in, one file out      ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
   repo      {}
   root      {}
   model     {}
   auth      {}
   format    {}

   type /ops to list operations, /help for commands
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        REPO,
        info.root.display(),
        info.model,
        info.auth_status,
        info.formatter,
    );
}

/// Print the session summary (task tally + farewell).
pub fn print_session_summary(succeeded: usize, failed: usize) {
    if succeeded + failed > 0 {
        println!("session: {succeeded} succeeded, {failed} failed");
    }
    println!("goodbye.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn print_banner_does_not_panic() {
        let info = BannerInfo {
            root: &PathBuf::from("/tmp/test"),
            model: "gpt-4o-mini",
            auth_status: "not authenticated",
            formatter: "npx prettier@3.4.2 --write",
        };
        print_banner(&info);
    }

    #[test]
    fn print_session_summary_with_tasks() {
        print_session_summary(3, 1);
    }

    #[test]
    fn print_session_summary_no_tasks() {
        // Should only print "goodbye." with no tally line
        print_session_summary(0, 0);
    }
}
