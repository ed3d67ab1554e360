use image_planar::{PlaneAccess, PlaneBuffer, PlaneStack, PlanarArray, SampleKind};
use image_shape::Shape;
use log::info;

const SZ_W: usize = 96;
const SZ_H: usize = 64;

/// Fills a hyperstack through the plane bridge, then writes every plane as a grayscale PNG.
///
/// Each plane gets a gradient whose brightness encodes its channel, slice and time point. Set
/// `IMAGE_PLANAR_SKIP_IO` to only fill the stack.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = env_logger::Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    // Two channels, three slices, two time points.
    let shape = Shape::from_lengths(&[SZ_W, SZ_H, 2, 3, 2])?;
    let mut stack = PlaneAccess::new(PlanarArray::new(shape, SampleKind::U8));

    for plane in 0..stack.plane_count()? {
        let coordinate = stack.coordinate_of(plane)?;
        let level = coordinate
            .iter()
            .zip([100, 40, 20])
            .map(|(&position, weight)| position * weight)
            .sum::<usize>();

        let samples = (0..SZ_W * SZ_H)
            .map(|idx| (level + 80 * (idx % SZ_W) / SZ_W).min(0xff) as u8)
            .collect::<Vec<_>>();
        stack.set_plane(plane, PlaneBuffer::from(samples))?;
        info!("plane {plane} at {:?} has level {level}", coordinate.as_slice());
    }

    if std::env::var_os("IMAGE_PLANAR_SKIP_IO").is_none() {
        write_planes(&stack)?;
    }

    Ok(())
}

fn write_planes(stack: &impl PlaneStack) -> Result<(), Box<dyn std::error::Error>> {
    let (width, height) = (stack.plane_width() as u32, stack.plane_height() as u32);

    for plane in 0..stack.plane_count()? {
        let samples = stack
            .plane(plane)?
            .as_slice::<u8>()
            .ok_or("plane does not hold 8-bit samples")?
            .to_owned();

        let image = image::GrayImage::from_raw(width, height, samples)
            .ok_or("plane does not match its dimensions")?;

        let output = format!(
            concat!(env!("CARGO_MANIFEST_DIR"), "/../plane-{:02}.png"),
            plane
        );
        image.save(&output)?;
        info!("wrote {output}");
    }

    Ok(())
}
