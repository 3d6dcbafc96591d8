use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use image::{ImageBuffer, Rgb, RgbImage};
use tracing::info;

use crate::{error::MapError, map_parameters::MapParameters, tile_map::TileMap};

/// Fills each output row up to [`MapParameters::MAX_DIMENSION`] columns.
pub const PADDING: char = '0';

impl TileMap {
    /// Writes the map as text, one line per row.
    ///
    /// Each tile is its [`Terrain::symbol`](crate::tile_component::Terrain::symbol), and every row is padded with
    /// [`PADDING`] to [`MapParameters::MAX_DIMENSION`] characters so all maps share one row length.
    pub fn write_rows(&self, writer: &mut impl Write) -> io::Result<()> {
        for line in self.padded_rows() {
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }

    /// The text [`TileMap::write_rows`] produces.
    pub fn to_text(&self) -> String {
        self.padded_rows().fold(String::new(), |mut text, line| {
            text.push_str(&line);
            text.push('\n');
            text
        })
    }

    fn padded_rows(&self) -> impl Iterator<Item = String> + '_ {
        let width = self.grid.width() as usize;
        let padding_length = (MapParameters::MAX_DIMENSION as usize).saturating_sub(width);

        self.terrain_list.chunks(width).map(move |row| {
            row.iter()
                .map(|terrain| terrain.symbol())
                .chain(std::iter::repeat_n(PADDING, padding_length))
                .collect()
        })
    }

    /// Saves the map text to `<directory>/<seed>`, creating the directory if needed.
    ///
    /// Returns the path of the written file.
    pub fn save_text(&self, directory: impl AsRef<Path>) -> io::Result<PathBuf> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory)?;

        let file_path = directory.join(self.seed.to_string());
        let mut file = io::BufWriter::new(fs::File::create(&file_path)?);
        self.write_rows(&mut file)?;
        file.flush()?;

        info!(path = %file_path.display(), "saved map");
        Ok(file_path)
    }

    /// Renders the map to an image with one `scale` × `scale` square per tile.
    pub fn to_image(&self, scale: u32) -> RgbImage {
        let scale = scale.max(1);
        let width = self.grid.width();
        ImageBuffer::from_fn(width * scale, self.grid.height() * scale, |x, y| {
            let index = (y / scale) * width + x / scale;
            Rgb(self.terrain_list[index as usize].color())
        })
    }

    /// Saves the preview image to `path`. The format follows the file extension.
    pub fn save_png(&self, path: impl AsRef<Path>, scale: u32) -> Result<(), MapError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        self.to_image(scale).save(path)?;

        info!(path = %path.display(), scale, "saved preview image");
        Ok(())
    }
}
