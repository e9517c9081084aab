/// Asset catalog: resolves "which photo goes with this level".
///
/// The terminal cannot draw photos, so a resolved entry is only a path the
/// renderer captions. A level with no entry resolves to `None` and the
/// reveal simply shows no photo.

use std::path::{Path, PathBuf};

use super::level::LevelIndex;

const REVEAL_FILES: [(u8, &str); 8] = [
    (1, "reveal-1.JPG"),
    (2, "reveal-2.jpg"),
    (3, "reveal-3.JPG"),
    (4, "reveal-4.jpg"),
    (5, "reveal-5.jpg"),
    (6, "reveal-6.JPG"),
    (7, "reveal-7.JPG"),
    (8, "reveal-8.jpg"),
];

const PUZZLE_FILE: &str = "puzzle.PNG";

#[derive(Clone, Debug)]
pub struct AssetCatalog {
    reveals: Vec<(LevelIndex, PathBuf)>,
    puzzle: Option<PathBuf>,
}

impl AssetCatalog {
    /// The standard table, rooted at `images_dir`.
    pub fn new(images_dir: &Path) -> Self {
        let reveals = REVEAL_FILES.iter()
            .filter_map(|(n, file)| LevelIndex::new(*n).map(|l| (l, images_dir.join(file))))
            .collect();
        AssetCatalog {
            reveals,
            puzzle: Some(images_dir.join(PUZZLE_FILE)),
        }
    }

    /// A catalog with no entries at all.
    pub fn empty() -> Self {
        AssetCatalog { reveals: Vec::new(), puzzle: None }
    }

    pub fn reveal_image(&self, level: LevelIndex) -> Option<&Path> {
        self.reveals.iter()
            .find(|(l, _)| *l == level)
            .map(|(_, p)| p.as_path())
    }

    pub fn puzzle_image(&self) -> Option<&Path> {
        self.puzzle.as_deref()
    }

    /// Image shown on a level's reveal screen. Level 9 borrows the puzzle
    /// picture since the reveal table stops at 8.
    pub fn image_for_reveal(&self, level: LevelIndex) -> Option<&Path> {
        if level == LevelIndex::LAST_GAME {
            self.puzzle_image()
        } else {
            self.reveal_image(level)
        }
    }
}
