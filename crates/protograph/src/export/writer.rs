//! Writes graph descriptions to disk and invokes the external renderer.
//!
//! A missing or failing renderer is reported through [`RenderOutcome`]
//! rather than as an error: the graph description is always kept.

use std::{
    env, fs,
    path::{Path, PathBuf},
    process::Command,
};

use log::{error, info, warn};

use protograph_core::semantic::is_file_stem;

use super::Error;
use crate::config::OutputConfig;

/// What happened when the renderer was asked for an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The image was written to this path.
    Rendered(PathBuf),
    /// No renderer executable could be located.
    RendererMissing,
    /// The renderer could not be spawned or exited unsuccessfully.
    RendererFailed(String),
}

/// Paths produced by a single write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputReport {
    graph_path: PathBuf,
    outcome: RenderOutcome,
}

impl OutputReport {
    pub fn graph_path(&self) -> &Path {
        &self.graph_path
    }

    pub fn outcome(&self) -> &RenderOutcome {
        &self.outcome
    }

    /// Returns the rendered image path, if rendering succeeded.
    pub fn image_path(&self) -> Option<&Path> {
        match &self.outcome {
            RenderOutcome::Rendered(path) => Some(path),
            _ => None,
        }
    }
}

/// Persists graph descriptions under an output directory.
#[derive(Debug)]
pub struct OutputWriter<'a> {
    config: &'a OutputConfig,
}

impl<'a> OutputWriter<'a> {
    pub fn new(config: &'a OutputConfig) -> Self {
        Self { config }
    }

    /// Writes `<out_dir>/<diagram_id>.<ext>` and renders `<diagram_id>.<format>` beside it.
    ///
    /// The output directory is created with all missing parents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the id, extension or format is not a plain
    /// file name component, and [`Error::Io`] if the directory or the graph
    /// file cannot be written.
    pub fn write(
        &self,
        graph: &str,
        out_dir: &Path,
        diagram_id: &str,
        format: &str,
    ) -> Result<OutputReport, Error> {
        let extension = self.config.graph_extension();
        for (what, part) in [("diagram id", diagram_id), ("extension", extension), ("format", format)] {
            if !is_file_stem(part) {
                return Err(Error::Render(format!(
                    "{what} `{part}` cannot be used in an output file name"
                )));
            }
        }

        fs::create_dir_all(out_dir)?;

        let graph_path = out_dir.join(format!("{diagram_id}.{extension}"));
        fs::write(&graph_path, graph)?;
        info!(path = graph_path.display().to_string(); "Graph description written");

        let outcome = match find_executable(self.config.renderer()) {
            Some(renderer) => {
                let image_path = out_dir.join(format!("{diagram_id}.{format}"));
                render_image(&renderer, &graph_path, image_path, format)
            }
            None => {
                warn!(
                    renderer = self.config.renderer();
                    "Renderer not found, skipping image output"
                );
                RenderOutcome::RendererMissing
            }
        };

        Ok(OutputReport {
            graph_path,
            outcome,
        })
    }
}

fn render_image(
    renderer: &Path,
    graph_path: &Path,
    image_path: PathBuf,
    format: &str,
) -> RenderOutcome {
    let status = Command::new(renderer)
        .arg(format!("-T{format}"))
        .arg("-o")
        .arg(&image_path)
        .arg(graph_path)
        .status();

    match status {
        Ok(status) if status.success() => {
            info!(path = image_path.display().to_string(); "Image rendered");
            RenderOutcome::Rendered(image_path)
        }
        Ok(status) => {
            error!(
                renderer = renderer.display().to_string(),
                status = status.to_string();
                "Renderer failed"
            );
            RenderOutcome::RendererFailed(format!("renderer exited with {status}"))
        }
        Err(err) => {
            error!(
                renderer = renderer.display().to_string(),
                error = err.to_string();
                "Renderer could not be started"
            );
            RenderOutcome::RendererFailed(err.to_string())
        }
    }
}

/// Locates an executable by path or by searching `PATH`.
pub(crate) fn find_executable(name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    let candidate = Path::new(name);
    if candidate.components().count() > 1 || candidate.is_absolute() {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let search_path = env::var_os("PATH")?;
    env::split_paths(&search_path).find_map(|dir| {
        executable_names(name)
            .map(|file| dir.join(file))
            .find(|path| path.is_file())
    })
}

fn executable_names(name: &str) -> impl Iterator<Item = String> {
    let suffixed = (!env::consts::EXE_SUFFIX.is_empty()
        && !name.ends_with(env::consts::EXE_SUFFIX))
    .then(|| format!("{name}{}", env::consts::EXE_SUFFIX));
    std::iter::once(name.to_string()).chain(suffixed)
}
