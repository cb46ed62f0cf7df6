use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(about = "Packs textures and glyph bitmaps into atlases")]
pub struct Options {
    #[structopt(subcommand)]
    pub command: Subcommand,
}

#[derive(Debug, StructOpt)]
pub enum Subcommand {
    /// Pack a list of rectangle sizes described by a TOML job file and print
    /// where each one landed as JSON.
    Pack(PackOptions),

    /// Pack a folder of PNG images into one or more atlas images, along with a
    /// JSON manifest describing where each image ended up.
    Atlas(AtlasOptions),

    /// Compare every packing algorithm on randomly generated rectangles and
    /// print the average wasted space of each as CSV.
    Bench(BenchOptions),
}

#[derive(Debug, StructOpt)]
pub struct PackOptions {
    /// The path to the job file to pack.
    pub job: PathBuf,

    /// Where to write the resulting layout. Defaults to stdout.
    #[structopt(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, StructOpt)]
pub struct AtlasOptions {
    /// The folder containing the images to pack.
    pub input: PathBuf,

    /// A glob, relative to the input folder, selecting which files to pack.
    #[structopt(long, default_value = "**/*.png")]
    pub glob: String,

    /// The size of each atlas page. If not given, all images are packed into
    /// a single page that is as large as it needs to be.
    #[structopt(long, number_of_values = 2, value_names = &["width", "height"])]
    pub max_size: Option<Vec<i32>>,

    /// The packing algorithm to use. Run 'texpack bench' to see the options.
    #[structopt(long)]
    pub algorithm: Option<String>,

    /// The folder to write atlas pages and the manifest into.
    #[structopt(long)]
    pub output: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct BenchOptions {
    /// Number of rectangles in each generated batch.
    #[structopt(long, default_value = "100")]
    pub count: usize,

    /// Minimum width and height of generated rectangles.
    #[structopt(long, default_value = "1")]
    pub min_size: i32,

    /// Maximum width and height of generated rectangles.
    #[structopt(long, default_value = "32")]
    pub max_size: i32,

    /// Number of batches to generate.
    #[structopt(long, default_value = "100")]
    pub iterations: u64,

    /// Seed for the random number generator.
    #[structopt(long, default_value = "4660")]
    pub seed: u64,
}
