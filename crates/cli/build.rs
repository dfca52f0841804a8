use std::{env, fs, path::PathBuf};

fn input_args(cmd: clap::Command) -> clap::Command {
    cmd.arg(clap::arg!(<INPUT> "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(clap::arg!(--url <URL> "Page URL for file or stdin input, used for site and PDF detection"))
        .arg(
            clap::Arg::new("content-type")
                .long("content-type")
                .value_name("MIME")
                .help("Declared content type of the page"),
        )
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(
            clap::Arg::new("user-agent")
                .long("user-agent")
                .value_name("UA")
                .help("Custom User-Agent for HTTP requests"),
        )
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("precis")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Precis Contributors")
        .about("Extract and summarize article text from web pages")
        .arg(
            clap::arg!(--settings <FILE> "Settings file")
                .global(true)
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(-v --verbose "Enable debug logging").global(true))
        .subcommand(
            input_args(clap::Command::new("extract").about("Print the article text of a page"))
                .arg(clap::arg!(--json "Print the {\"text\": ...} response instead of plain text")),
        )
        .subcommand(
            input_args(clap::Command::new("summarize").about("Summarize the article text of a page"))
                .arg(
                    clap::Arg::new("type")
                        .short('t')
                        .long("type")
                        .value_name("TYPE")
                        .help("Summary type")
                        .default_value("brief")
                        .value_parser(["brief", "detailed", "bullets", "key-insights"]),
                )
                .arg(clap::arg!(--model <MODEL> "Model to use instead of the configured one"))
                .arg(
                    clap::Arg::new("export")
                        .long("export")
                        .value_name("FORMAT|FILE")
                        .help("Also export the summary: txt, md, or a file path")
                        .num_args(0..=1)
                        .default_missing_value("txt"),
                ),
        )
        .subcommand(
            clap::Command::new("key")
                .about("Manage the Gemini API key")
                .subcommand(
                    clap::Command::new("set")
                        .about("Validate and store an API key")
                        .arg(clap::arg!(<KEY> "Gemini API key")),
                )
                .subcommand(clap::Command::new("show").about("Show which API key would be used")),
        )
        .subcommand(
            clap::Command::new("completions")
                .about("Print a shell completion script")
                .arg(clap::arg!(<SHELL> "Shell").value_parser(["bash", "zsh", "fish", "powershell", "elvish"])),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "precis", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "precis", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "precis", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "precis", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
