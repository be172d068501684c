use std::collections::VecDeque;
use std::path::PathBuf;
use std::process::Command;

use manual_core::{Effect, Msg, UpstreamError};
use manual_engine::{export_document, save_export, EngineEvent, EngineHandle, ExportOptions};
use manual_logging::{manual_info, manual_warn};

/// Carries out effects emitted by the core and turns engine events back into
/// messages.
pub struct EffectRunner {
    engine: EngineHandle,
    output_dir: PathBuf,
    export_options: ExportOptions,
    open_in_browser: bool,
    rejected: VecDeque<Msg>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, output_dir: PathBuf, open_in_browser: bool) -> Self {
        Self {
            engine,
            output_dir,
            export_options: ExportOptions::default(),
            open_in_browser,
            rejected: VecDeque::new(),
        }
    }

    /// Runs `effects` in order and returns lines to show the user.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<String> {
        let mut notices = Vec::new();
        for effect in effects {
            match effect {
                Effect::FetchCatalog {
                    generation,
                    keyword,
                    page_size,
                } => {
                    manual_info!("FetchCatalog generation={} keyword={:?}", generation, keyword);
                    if let Err(err) = self.engine.search(generation, keyword.clone(), page_size) {
                        self.rejected.push_back(event_to_msg(EngineEvent::CatalogFetched {
                            generation,
                            keyword,
                            result: Err(err),
                        }));
                    }
                }
                Effect::OpenReference { url } => {
                    if self.open_in_browser {
                        if let Err(err) = open_external(&url) {
                            manual_warn!("Failed to open {}: {}", url, err);
                            notices.push(format!("could not open browser: {err}"));
                        }
                    }
                    notices.push(url);
                }
                Effect::SaveExport { keyword, items } => {
                    let document = export_document(&keyword, &items, &self.export_options);
                    match save_export(&self.output_dir, &document) {
                        Ok(path) => {
                            manual_info!("Exported {} rows to {:?}", items.len(), path);
                            notices.push(format!("saved {} rows to {}", items.len(), path.display()));
                        }
                        Err(err) => {
                            manual_warn!("Export failed: {}", err);
                            notices.push(format!("export failed: {err}"));
                        }
                    }
                }
            }
        }
        notices
    }

    /// Next engine completion as a core message, if one is waiting. Searches
    /// the engine refused complete here as failures.
    pub fn poll(&mut self) -> Option<Msg> {
        self.rejected
            .pop_front()
            .or_else(|| self.engine.try_recv().map(event_to_msg))
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::CatalogFetched {
            generation,
            keyword,
            result,
        } => {
            if let Err(err) = &result {
                manual_warn!("Search {} ({:?}) failed: {}", generation, keyword, err);
            }
            Msg::CatalogFetched {
                generation,
                result: result.map_err(UpstreamError::from),
            }
        }
    }
}

fn open_external(url: &str) -> std::io::Result<()> {
    let mut command = if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else if cfg!(target_os = "macos") {
        Command::new("open")
    } else {
        Command::new("xdg-open")
    };
    command.arg(url).spawn().map(|_| ())
}
