use argh::FromArgs;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::str::FromStr;
use std::time::Instant;

use binmorph::{
    image::{Image, ImageSize},
    imgproc::{
        binary::BinaryImage,
        morphology::{self, ElementShape, StructuringElement},
        parallel::ExecutionStrategy,
    },
};

#[derive(Debug, Clone, Copy)]
enum Op {
    Dilate,
    Erode,
    Open,
    Close,
}

impl FromStr for Op {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dilate" => Ok(Op::Dilate),
            "erode" => Ok(Op::Erode),
            "open" => Ok(Op::Open),
            "close" => Ok(Op::Close),
            other => Err(format!("unknown operation: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    Square,
    Cross,
    Diamond,
    Disk,
    Octagon,
}

impl Shape {
    fn element(self, size: usize) -> ElementShape {
        match self {
            Shape::Square => ElementShape::Square { size },
            Shape::Cross => ElementShape::Cross { size },
            Shape::Diamond => ElementShape::Diamond { radius: size },
            Shape::Disk => ElementShape::Disk { radius: size },
            Shape::Octagon => ElementShape::Octagon { radius: size },
        }
    }
}

impl FromStr for Shape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "square" => Ok(Shape::Square),
            "cross" => Ok(Shape::Cross),
            "diamond" => Ok(Shape::Diamond),
            "disk" => Ok(Shape::Disk),
            "octagon" => Ok(Shape::Octagon),
            other => Err(format!(
                "unknown shape: {other} (expected square, cross, diamond, disk or octagon)"
            )),
        }
    }
}

#[derive(FromArgs)]
/// Apply a binary morphological operation to a random image and print it as ASCII
struct Args {
    /// operation: dilate, erode, open, close (default: dilate)
    #[argh(option, short = 'o', default = "Op::Dilate")]
    op: Op,

    /// element shape: square, cross, diamond, disk, octagon (default: square)
    #[argh(option, short = 'k', default = "Shape::Square")]
    shape: Shape,

    /// element size, or radius for round shapes (default: 3)
    #[argh(option, short = 's', default = "3")]
    size: usize,

    /// image width (default: 48)
    #[argh(option, default = "48")]
    width: usize,

    /// image height (default: 24)
    #[argh(option, default = "24")]
    height: usize,

    /// random seed (default: 0)
    #[argh(option, default = "0")]
    seed: u64,

    /// foreground probability per pixel (default: 0.35)
    #[argh(option, default = "0.35")]
    density: f64,

    /// number of threads; runs serially when 1 and on the global pool when omitted
    #[argh(option)]
    threads: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let shape = args.shape.element(args.size);
    let element = StructuringElement::from_shape(shape)?;

    let strategy = match args.threads {
        None => ExecutionStrategy::ParallelRows,
        Some(1) => ExecutionStrategy::Serial,
        Some(n) => ExecutionStrategy::Fixed(n),
    };

    // generate a random binary image
    let mut rng = StdRng::seed_from_u64(args.seed);
    let density = args.density.clamp(0.0, 1.0);
    let data = (0..args.width * args.height)
        .flat_map(|_| {
            let v = if rng.random_bool(density) { 255 } else { 0 };
            [v, v, v, 255]
        })
        .collect();
    let mut image = Image::<u8, 4>::new(
        ImageSize {
            width: args.width,
            height: args.height,
        },
        data,
    )?;

    let before = BinaryImage::from_rgba(&image)?;

    let start = Instant::now();
    match args.op {
        Op::Dilate => morphology::dilate_with(&mut image, &element, strategy)?,
        Op::Erode => morphology::erode_with(&mut image, &element, strategy)?,
        Op::Open => morphology::open_with(&mut image, &element, strategy)?,
        Op::Close => morphology::close_with(&mut image, &element, strategy)?,
    }
    let elapsed = start.elapsed();

    let after = BinaryImage::from_rgba(&image)?;

    log::info!(
        "{:?} with {:?} on {}: {} -> {} foreground pixels in {:?}",
        args.op,
        shape,
        image.size(),
        before.foreground_count(),
        after.foreground_count(),
        elapsed,
    );

    println!("before:\n{}", before.to_ascii());
    println!("after:\n{}", after.to_ascii());

    Ok(())
}
