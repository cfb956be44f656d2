use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "quizdance", version, about = "Terminal quiz session player")]
pub struct Cli {
    /// Path to a quiz .json file, or a directory containing one [default: .]
    #[arg(default_value = ".")]
    pub path_or_dir: String,

    /// Interface-text bundle [default: system_texts.json next to the quiz]
    #[arg(long, value_name = "path")]
    pub texts: Option<String>,

    /// Seed the feedback picker for a reproducible run
    #[arg(long, value_name = "n")]
    pub seed: Option<u64>,
}
