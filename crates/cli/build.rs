use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("stackscope")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Stackscope Contributors")
        .about("Content analytics for newsletter posts")
        .arg(clap::arg!([INPUT] "Post file (JSON, HTML or text), or '-' for stdin"))
        .arg(
            clap::arg!(--history <FILE> "JSON array of post summaries used for publishing cadence")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--title <TITLE> "Title for HTML or text input"))
        .arg(clap::arg!(--url <URL> "Canonical URL for HTML or text input"))
        .arg(clap::arg!(--published <TIMESTAMP> "Publication timestamp (RFC 3339) for HTML or text input"))
        .arg(
            clap::arg!(--"input-format" <FORMAT> "Input format (auto, json, html, text)")
                .default_value("auto")
                .value_parser(["auto", "json", "html", "text"]),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (json, digest, text, markdown)")
                .default_value("json")
                .value_parser(["json", "digest", "text", "markdown"]),
        )
        .arg(clap::arg!(--pretty "Pretty print JSON output"))
        .arg(clap::arg!(--frontmatter "Include TOML frontmatter (Markdown only)"))
        .arg(clap::arg!(--top <NUM> "Number of keywords to keep").default_value("12"))
        .arg(clap::arg!(--"min-keyword-length" <NUM> "Minimum keyword length in characters").default_value("3"))
        .arg(clap::arg!(--"no-sentiment" "Skip sentiment scoring"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .arg(
            clap::arg!(--completions <SHELL> "Generate shell completion script")
                .value_parser(["bash", "zsh", "fish", "powershell"]),
        );

    for shell in [
        clap_complete::shells::Shell::Bash,
        clap_complete::shells::Shell::Zsh,
        clap_complete::shells::Shell::Fish,
        clap_complete::shells::Shell::PowerShell,
    ] {
        clap_complete::generate_to(shell, &mut cmd, "stackscope", &completions_dir).unwrap();
    }

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
