use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use foldkit_engine::canvas::{Canvas, RasterCanvas};
use foldkit_engine::paint::{Bitmap, BitmapAllocator, Color, HeapAllocator};

/// Rasterizes frames into one reused bitmap and saves each as a PNG.
pub struct FrameWriter {
    dir: PathBuf,
    frame: Bitmap,
    background: Color,
    written: usize,
}

impl FrameWriter {
    pub fn new(dir: &Path, width: u32, height: u32) -> Result<Self> {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let frame = HeapAllocator
            .allocate(width, height)
            .with_context(|| format!("allocating a {width}x{height} frame"))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            frame,
            background: Color::from_rgba8(0xf4, 0xf1, 0xea, 255),
            written: 0,
        })
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.frame.width(), self.frame.height())
    }

    /// Total frames saved so far.
    #[inline]
    pub fn written(&self) -> usize {
        self.written
    }

    /// Clears the frame, lets `draw` paint it, and saves `<scene>_<index>.png`.
    pub fn write(&mut self, scene: &str, index: usize, draw: impl FnOnce(&mut dyn Canvas)) -> Result<PathBuf> {
        self.frame.clear(self.background);
        {
            let mut canvas = RasterCanvas::new(&mut self.frame);
            draw(&mut canvas);
        }

        let path = self.dir.join(format!("{scene}_{index:04}.png"));
        self.frame
            .to_image()
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        self.written += 1;
        log::trace!("wrote {}", path.display());
        Ok(path)
    }
}
