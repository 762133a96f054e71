use std::collections::HashMap;
use std::path::Path;

use eframe::egui;

use skills_orbit::assets::{load_icon, resolve};
use skills_orbit::SkillConfig;

/// Icon textures keyed by skill name. Skills whose icon failed to load are
/// simply absent and get a placeholder.
pub struct IconCache {
    textures: HashMap<String, egui::TextureHandle>,
}

impl IconCache {
    pub fn load<'a>(
        ctx: &egui::Context,
        root: &Path,
        skills: impl Iterator<Item = &'a SkillConfig>,
    ) -> Self {
        let mut textures = HashMap::new();
        for skill in skills {
            let path = resolve(root, &skill.logo);
            match load_icon(&path) {
                Ok(icon) => {
                    let image = egui::ColorImage::from_rgba_unmultiplied(
                        [icon.width as usize, icon.height as usize],
                        &icon.rgba,
                    );
                    let tex = ctx.load_texture(
                        format!("icon-{}", skill.name),
                        image,
                        egui::TextureOptions::LINEAR,
                    );
                    textures.insert(skill.name.clone(), tex);
                }
                Err(e) => log::warn!("{}: {} (using placeholder)", skill.name, e),
            }
        }
        log::info!("Loaded {} icons", textures.len());
        Self { textures }
    }

    pub fn get(&self, name: &str) -> Option<&egui::TextureHandle> {
        self.textures.get(name)
    }
}

/// Up to two initials for the placeholder disc ("Machine Learning" → "ML").
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|w| !w.is_empty())
        .collect();
    match words.as_slice() {
        [] => String::new(),
        [one] => one.chars().take(2).collect(),
        [first, second, ..] => first
            .chars()
            .take(1)
            .chain(second.chars().take(1))
            .collect::<String>()
            .to_uppercase(),
    }
}
