use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "tali", version, about = "Terminal UI for browsing Aliyun resources")]
pub struct Args {
    /// Profile from ~/.aliyun/config.json to make current before start
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Objects per page when listing an OSS bucket
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub page_size: Option<u32>,

    /// Theme name, e.g. "latte" or "Catppuccin Mocha"
    #[arg(short, long)]
    pub theme: Option<String>,
}
