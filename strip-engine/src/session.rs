//! Stripping session driver
//!
//! One session spans one build. The front end calls [`StripSession::process`]
//! once per (shader, pass) unit with the mutable variant list; the session
//! runs the policy chain, keeps the counters and log buffers current, and
//! assembles everything into a [`SessionReport`] at the end. All session
//! state lives here - there are no process-wide globals.

use std::time::Duration;

use hashbrown::HashSet;
use log::info;

use crate::policy::StripPolicy;
use crate::shader::{CompiledVariant, PassInfo, ShaderInfo};
use crate::stopwatch::Stopwatch;

/// Session-wide switches.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// A disabled session counts nothing and strips nothing.
    pub enabled: bool,
    /// Record per-variant detail lines and the keyword/platform ledgers.
    pub deep_logs: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            deep_logs: false,
        }
    }
}

/// Drives the ordered policy chain over every compiled unit of a build.
pub struct StripSession {
    policies: Vec<Box<dyn StripPolicy>>,
    options: SessionOptions,
    session_watch: Stopwatch,
    strip_watch: Stopwatch,
    variants_seen: u64,
    variants_kept: u64,
    kept_log: Vec<String>,
    stripped_log: Vec<String>,
    all_keywords: HashSet<String>,
    kept_keywords: HashSet<String>,
    all_platforms: HashSet<String>,
    kept_platforms: HashSet<String>,
}

impl StripSession {
    pub fn new(policies: Vec<Box<dyn StripPolicy>>, options: SessionOptions) -> Self {
        let mut session_watch = Stopwatch::new();
        if options.enabled {
            let names: Vec<&str> = policies.iter().map(|p| p.name()).collect();
            info!("stripping session started, policy chain: {names:?}");
            session_watch.start();
        } else {
            info!("stripping disabled");
        }
        Self {
            policies,
            options,
            session_watch,
            strip_watch: Stopwatch::new(),
            variants_seen: 0,
            variants_kept: 0,
            kept_log: vec!["Unstripped shaders:".to_string()],
            stripped_log: Vec::new(),
            all_keywords: HashSet::new(),
            kept_keywords: HashSet::new(),
            all_platforms: HashSet::new(),
            kept_platforms: HashSet::new(),
        }
    }

    /// Run the policy chain over one (shader, pass) unit, removing
    /// rejected variants from `variants` in place.
    pub fn process(
        &mut self,
        shader: &ShaderInfo,
        pass: &PassInfo,
        variants: &mut Vec<CompiledVariant>,
    ) {
        if !self.options.enabled {
            return;
        }
        self.variants_seen += variants.len() as u64;
        if self.options.deep_logs {
            for variant in variants.iter() {
                self.all_keywords
                    .extend(variant.keywords.iter().cloned());
                if let Some(platform) = &variant.platform {
                    self.all_platforms.insert(platform.clone());
                }
            }
        }

        self.strip_watch.start();
        for policy in &self.policies {
            policy.evaluate(shader, pass, variants);
            if variants.is_empty() {
                // Nothing left for later policies to examine.
                break;
            }
        }
        self.strip_watch.stop();

        if variants.is_empty() {
            self.stripped_log.push(format!(
                "{}::[{}]{}",
                shader.name, pass.pass_type, pass.pass_name
            ));
            return;
        }

        self.variants_kept += variants.len() as u64;
        self.kept_log.push(format!(
            "    {}::[{}]{} [{} variants]",
            shader.name,
            pass.pass_type,
            pass.pass_name,
            variants.len()
        ));
        if self.options.deep_logs {
            for variant in variants.iter() {
                let platform = variant.platform.as_deref().unwrap_or("-");
                self.kept_log.push(format!(
                    "        [{platform}] {}",
                    variant.keywords.join(" ")
                ));
                self.kept_keywords
                    .extend(variant.keywords.iter().cloned());
                if let Some(platform) = &variant.platform {
                    self.kept_platforms.insert(platform.clone());
                }
            }
        }
    }

    /// Stop the clocks and assemble the session report.
    pub fn finish(mut self) -> SessionReport {
        self.session_watch.stop();
        let stripped_keywords = sorted_difference(&self.all_keywords, &self.kept_keywords);
        let stripped_platforms = sorted_difference(&self.all_platforms, &self.kept_platforms);
        let report = SessionReport {
            session_time: self.session_watch.elapsed(),
            strip_time: self.strip_watch.elapsed(),
            variants_seen: self.variants_seen,
            variants_kept: self.variants_kept,
            kept_log: self.kept_log,
            stripped_log: self.stripped_log,
            all_keywords: sorted(self.all_keywords),
            kept_keywords: sorted(self.kept_keywords),
            stripped_keywords,
            all_platforms: sorted(self.all_platforms),
            kept_platforms: sorted(self.kept_platforms),
            stripped_platforms,
        };
        info!("{}", report.summary().replace('\n', ", "));
        report
    }
}

fn sorted(set: HashSet<String>) -> Vec<String> {
    let mut list: Vec<String> = set.into_iter().collect();
    list.sort();
    list
}

fn sorted_difference(all: &HashSet<String>, kept: &HashSet<String>) -> Vec<String> {
    let mut list: Vec<String> = all.difference(kept).cloned().collect();
    list.sort();
    list
}

/// Aggregate results of one stripping session.
#[derive(Debug, Clone, Default)]
pub struct SessionReport {
    /// Wall time between session start and finish.
    pub session_time: Duration,
    /// Time spent inside the policy chain.
    pub strip_time: Duration,
    pub variants_seen: u64,
    pub variants_kept: u64,
    /// One line per kept (shader, pass) group; per-variant detail lines
    /// when deep logs were enabled.
    pub kept_log: Vec<String>,
    /// One line per fully stripped (shader, pass) group.
    pub stripped_log: Vec<String>,
    /// Ledgers, sorted; populated only with deep logs.
    pub all_keywords: Vec<String>,
    pub kept_keywords: Vec<String>,
    pub stripped_keywords: Vec<String>,
    pub all_platforms: Vec<String>,
    pub kept_platforms: Vec<String>,
    pub stripped_platforms: Vec<String>,
}

impl SessionReport {
    pub fn variants_stripped(&self) -> u64 {
        self.variants_seen - self.variants_kept
    }

    /// Human-readable header for console output and log files.
    pub fn summary(&self) -> String {
        format!(
            "Session time: {}ms\nStrip time: {}ms\nTotal variants built: {}\nTotal variants stripped: {}",
            self.session_time.as_millis(),
            self.strip_time.as_millis(),
            self.variants_kept,
            self.variants_stripped()
        )
    }
}
