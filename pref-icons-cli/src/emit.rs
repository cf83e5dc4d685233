//! Output backends: PNG always, the SVG source on request.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use pref_icons::RegionIcon;
use resvg::usvg;
use tiny_skia::Pixmap;

/// A failure while writing one icon to disk.
#[derive(Debug)]
pub enum EmitError {
    Svg(String),
    Pixmap(u32),
    Encode(String),
    Io(std::io::Error),
}

impl std::fmt::Display for EmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmitError::Svg(msg) => write!(f, "could not parse generated SVG: {}", msg),
            EmitError::Pixmap(size) => write!(f, "could not allocate a {}x{} pixmap", size, size),
            EmitError::Encode(msg) => write!(f, "could not encode PNG: {}", msg),
            EmitError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for EmitError {}

impl From<std::io::Error> for EmitError {
    fn from(err: std::io::Error) -> Self {
        EmitError::Io(err)
    }
}

/// Writes planned icons into one output directory.
///
/// Font loading is slow, so the usvg options live here and every icon
/// renders against the same set.
pub struct Renderer {
    options: usvg::Options<'static>,
    out_dir: PathBuf,
}

impl Renderer {
    pub fn new(out_dir: &Path) -> Result<Self, EmitError> {
        fs::create_dir_all(out_dir)?;

        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();

        Ok(Self {
            options,
            out_dir: out_dir.to_path_buf(),
        })
    }

    /// Write one icon as `<stem>.png`, plus `<stem>.svg` when asked.
    /// Returns the PNG path.
    pub fn write_icon(
        &self,
        icon: &RegionIcon,
        size_px: u32,
        keep_svg: bool,
    ) -> Result<PathBuf, EmitError> {
        if keep_svg {
            let svg_path = self.out_dir.join(format!("{}.svg", icon.file_stem));
            fs::write(&svg_path, &icon.svg)?;
        }

        let png = rasterize(&icon.svg, size_px, &self.options)?;
        let png_path = self.out_dir.join(format!("{}.png", icon.file_stem));
        png.save(&png_path)
            .map_err(|err| EmitError::Encode(err.to_string()))?;

        Ok(png_path)
    }
}

/// Parse and render an SVG document with resvg.
fn rasterize(svg: &str, size_px: u32, options: &usvg::Options) -> Result<RgbaImage, EmitError> {
    let tree =
        usvg::Tree::from_str(svg, options).map_err(|err| EmitError::Svg(err.to_string()))?;

    let mut pixmap = Pixmap::new(size_px, size_px).ok_or(EmitError::Pixmap(size_px))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    // tiny-skia pixels are premultiplied; PNG wants straight alpha.
    let mut data = Vec::with_capacity(size_px as usize * size_px as usize * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    RgbaImage::from_raw(size_px, size_px, data)
        .ok_or_else(|| EmitError::Encode("pixel buffer size mismatch".to_string()))
}
