// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("debstat")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Debstat Contributors")
        .about("Rank Debian packages by file count from a mirror's Contents indices")
        .arg(Arg::new("arch").help("Architecture to analyze (default: this machine's)"))
        .arg(
            Arg::new("top")
                .short('n')
                .long("top")
                .value_name("N")
                .default_value("10")
                .help("Number of packages in the ranking"),
        )
        .arg(
            Arg::new("mirror")
                .long("mirror")
                .value_name("URL")
                .default_value("http://ftp.uk.debian.org/debian/dists/stable/main")
                .help("Mirror directory URL holding the Contents indices"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .value_parser(["table", "json"])
                .default_value("table")
                .help("Ranking output format"),
        )
        .arg(
            Arg::new("export")
                .long("export")
                .value_name("PATH")
                .help("Write the full package-to-files table as JSON to this path"),
        )
        .arg(
            Arg::new("save")
                .long("save")
                .value_name("PATH")
                .help("Save the decoded Contents index to this path"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .action(ArgAction::SetTrue)
                .help("Fail on malformed index lines instead of skipping them"),
        )
        .arg(
            Arg::new("strip_sections")
                .long("strip-sections")
                .action(ArgAction::SetTrue)
                .help("Strip section prefixes (e.g. \"utils/\") from package identifiers"),
        )
        .arg(
            Arg::new("completions")
                .long("completions")
                .value_name("SHELL")
                .value_parser(["bash", "zsh", "fish", "powershell"])
                .help("Generate shell completions and exit"),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory
    let out_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("Failed to create man directory");

    // Generate main man page
    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();
    man.render(&mut buffer)
        .expect("Failed to render man page");

    let man_path = man_dir.join("debstat.1");
    fs::write(&man_path, buffer).expect("Failed to write man page");

    println!("cargo:warning=Man page generated at {}", man_path.display());
}
