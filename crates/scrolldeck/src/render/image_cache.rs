use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use eframe::egui;
use rayon::prelude::*;

struct Decoded {
    key: String,
    image: Option<egui::ColorImage>,
}

/// Background images decoded off the UI thread at startup.
///
/// Prefetching is a warm-up only: a failed image is logged and the slide
/// simply renders without it.
pub struct ImageCache {
    base_path: PathBuf,
    textures: HashMap<String, egui::TextureHandle>,
    decoded: HashMap<String, egui::ColorImage>,
    pending: usize,
    sender: Sender<Decoded>,
    receiver: Receiver<Decoded>,
}

impl ImageCache {
    pub fn new(base_path: PathBuf) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            base_path,
            textures: HashMap::new(),
            decoded: HashMap::new(),
            pending: 0,
            sender,
            receiver,
        }
    }

    /// Start decoding every path in parallel on a background thread.
    pub fn prefetch(&mut self, paths: &[&str]) {
        let jobs: Vec<(String, PathBuf)> = paths
            .iter()
            .filter(|p| !self.textures.contains_key(**p))
            .map(|p| (p.to_string(), self.base_path.join(p)))
            .collect();
        if jobs.is_empty() {
            return;
        }

        log::info!("prefetching {} image(s)", jobs.len());
        self.pending += jobs.len();
        let tx = self.sender.clone();

        std::thread::spawn(move || {
            jobs.into_par_iter().for_each_with(tx, |tx, (key, path)| {
                let image = decode(&path);
                // The cache is gone when the app closed mid-prefetch.
                let _ = tx.send(Decoded { key, image });
            });
        });
    }

    /// Collect finished decodes. Returns how many arrived.
    fn drain(&mut self) -> usize {
        let mut arrived = 0;
        while let Ok(done) = self.receiver.try_recv() {
            arrived += 1;
            self.pending = self.pending.saturating_sub(1);
            if let Some(image) = done.image {
                self.decoded.insert(done.key, image);
            }
        }
        arrived
    }

    /// Upload newly decoded images as textures. Call once per frame.
    pub fn poll(&mut self, ctx: &egui::Context) {
        self.drain();
        for (key, image) in self.decoded.drain() {
            let texture = ctx.load_texture(&key, image, egui::TextureOptions::LINEAR);
            self.textures.insert(key, texture);
        }
    }

    pub fn is_ready(&self) -> bool {
        self.pending == 0
    }

    pub fn texture(&self, key: &str) -> Option<&egui::TextureHandle> {
        self.textures.get(key)
    }
}

fn decode(path: &Path) -> Option<egui::ColorImage> {
    match image::open(path) {
        Ok(img) => {
            let rgba = img.into_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            Some(egui::ColorImage::from_rgba_unmultiplied(
                size,
                rgba.as_raw(),
            ))
        }
        Err(e) => {
            log::warn!("could not load image {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn drain_all(cache: &mut ImageCache) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !cache.is_ready() {
            cache.drain();
            assert!(Instant::now() < deadline, "prefetch never finished");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_prefetch_decodes_and_tolerates_failures() {
        let dir = std::env::temp_dir().join(format!("scrolldeck-images-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let pixels = vec![255u8; 4 * 4 * 4];
        image::save_buffer(dir.join("ok.png"), &pixels, 4, 4, image::ColorType::Rgba8).unwrap();

        let mut cache = ImageCache::new(dir.clone());
        cache.prefetch(&["ok.png", "missing.png"]);
        assert!(!cache.is_ready());
        drain_all(&mut cache);

        assert!(cache.decoded.contains_key("ok.png"));
        assert!(!cache.decoded.contains_key("missing.png"));
        assert_eq!(cache.decoded["ok.png"].size, [4, 4]);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_nothing_to_prefetch_is_ready() {
        let mut cache = ImageCache::new(PathBuf::from("."));
        cache.prefetch(&[]);
        assert!(cache.is_ready());
    }
}
