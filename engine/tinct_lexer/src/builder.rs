//! Lexer definition builder.
//!
//! A builder collects states, keyword sets, metadata and the startup hook,
//! then [`LexerBuilder::build`] validates the whole definition and compiles
//! every pattern. Nothing is checked lazily at scan time.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::BuildError;
use crate::keywords::KeywordSet;
use crate::lexer::{DetectFn, Lexer, Metadata, OptionDecl, StartHook};
use crate::pattern::{Pattern, PatternSpec};
use crate::rule::{
    Action, CompiledAction, CompiledGroup, CompiledRule, CompiledState, Next, RuleSpec, Transition,
};
use crate::scan::StartContext;
use crate::state::{Blueprint, StateBuilder, StateId};

/// Builder for a [`Lexer`].
///
/// Errors found while states are being added (such as a mixin of an
/// undefined state) are kept and the first one is returned by
/// [`build`](Self::build).
pub struct LexerBuilder {
    meta: Metadata,
    blueprint: Blueprint,
    start: String,
    on_start: Option<StartHook>,
    keyword_sets: FxHashMap<String, Arc<KeywordSet>>,
    error: Option<BuildError>,
}

impl LexerBuilder {
    pub fn new(tag: impl Into<String>) -> Self {
        LexerBuilder {
            meta: Metadata::new(tag.into()),
            blueprint: Blueprint::default(),
            start: "root".to_owned(),
            on_start: None,
            keyword_sets: FxHashMap::default(),
            error: None,
        }
    }

    /// Start from a copy of `base`.
    ///
    /// States, keyword sets, the start state, the startup hook, title,
    /// description and declared options are inherited; aliases, filenames,
    /// mimetypes and the detector are not. State handles of `base` stay valid
    /// for the new definition.
    pub fn extending(base: &Lexer, tag: impl Into<String>) -> Self {
        let mut meta = Metadata::new(tag.into());
        meta.title.clone_from(&base.meta().title);
        meta.description.clone_from(&base.meta().description);
        meta.options.clone_from(&base.meta().options);
        LexerBuilder {
            meta,
            blueprint: base.blueprint().clone(),
            start: base.start_state_name().to_owned(),
            on_start: base.on_start_hook().cloned(),
            keyword_sets: base.keyword_sets().clone(),
            error: None,
        }
    }

    // === Metadata ===

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.meta.title = title.into();
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.meta.description = description.into();
        self
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.meta.aliases.push(alias.into());
        self
    }

    /// Filename glob such as `*.css`.
    #[must_use]
    pub fn filename(mut self, glob: impl Into<String>) -> Self {
        self.meta.filenames.push(glob.into());
        self
    }

    #[must_use]
    pub fn mimetype(mut self, mimetype: impl Into<String>) -> Self {
        self.meta.mimetypes.push(mimetype.into());
        self
    }

    /// Declare an option this definition understands.
    #[must_use]
    pub fn option(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        self.meta.options.retain(|o| o.name != name);
        self.meta.options.push(OptionDecl {
            name,
            description: description.into(),
        });
        self
    }

    /// Content sniffer used by callers that pick a definition for unnamed
    /// input.
    #[must_use]
    pub fn detect<F>(mut self, detect: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.meta.detect = Some(Arc::new(detect) as DetectFn);
        self
    }

    // === States ===

    /// State pushed at the start of every scan. Defaults to `root`.
    #[must_use]
    pub fn start_state(mut self, name: impl Into<String>) -> Self {
        self.start = name.into();
        self
    }

    /// Define `name`, replacing any earlier definition.
    #[must_use]
    pub fn state(mut self, name: &str, define: impl FnOnce(&mut StateBuilder<'_>)) -> Self {
        let (rules, error) = self.collect(name, define);
        self.note(error);
        self.blueprint.define(name, rules);
        self
    }

    /// Add rules in front of the existing rules of `name`.
    #[must_use]
    pub fn prepend(self, name: &str, define: impl FnOnce(&mut StateBuilder<'_>)) -> Self {
        self.splice(name, define, |existing, mut added| {
            added.append(existing);
            *existing = added;
        })
    }

    /// Add rules after the existing rules of `name`.
    #[must_use]
    pub fn append(self, name: &str, define: impl FnOnce(&mut StateBuilder<'_>)) -> Self {
        self.splice(name, define, |existing, mut added| existing.append(&mut added))
    }

    fn splice(
        mut self,
        name: &str,
        define: impl FnOnce(&mut StateBuilder<'_>),
        join: impl FnOnce(&mut Vec<RuleSpec>, Vec<RuleSpec>),
    ) -> Self {
        let (rules, error) = self.collect(name, define);
        self.note(error);
        match self.blueprint.rules_mut(name) {
            Some(existing) => join(existing, rules),
            None => {
                let error = BuildError::UndefinedState {
                    lexer: self.meta.tag.clone(),
                    state: name.to_owned(),
                };
                self.note(Some(error));
            }
        }
        self
    }

    fn collect(
        &self,
        name: &str,
        define: impl FnOnce(&mut StateBuilder<'_>),
    ) -> (Vec<RuleSpec>, Option<BuildError>) {
        let mut state = StateBuilder::new(&self.blueprint, &self.meta.tag, name);
        define(&mut state);
        state.finish()
    }

    fn note(&mut self, error: Option<BuildError>) {
        if self.error.is_none() {
            self.error = error;
        }
    }

    /// Handle for `name`, for use in callbacks.
    ///
    /// The state must be defined by the time [`build`](Self::build) runs.
    pub fn state_id(&mut self, name: &str) -> StateId {
        self.blueprint.intern(name)
    }

    /// Register (or replace) a named keyword set.
    #[must_use]
    pub fn keywords(mut self, name: impl Into<String>, set: KeywordSet) -> Self {
        self.keyword_sets.insert(name.into(), Arc::new(set));
        self
    }

    /// Hook run once per scan, after the start state is pushed and before
    /// the first rule is tried.
    #[must_use]
    pub fn on_start<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut StartContext<'_>) + Send + Sync + 'static,
    {
        self.on_start = Some(Arc::new(hook) as StartHook);
        self
    }

    // === Build ===

    pub fn build(self) -> Result<Lexer, BuildError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let tag = self.meta.tag.as_str();

        let start = match self.blueprint.lookup(&self.start) {
            Some(id) if self.blueprint.rules(&self.start).is_some() => id,
            _ => {
                return Err(BuildError::MissingStartState {
                    lexer: tag.to_owned(),
                    state: self.start.clone(),
                })
            }
        };

        let mut compiler = Compiler {
            tag,
            blueprint: &self.blueprint,
            keyword_sets: &self.keyword_sets,
            patterns: FxHashMap::default(),
        };
        let mut states = Vec::with_capacity(self.blueprint.len());
        for (_, name, rules) in self.blueprint.iter() {
            let Some(rules) = rules else {
                return Err(BuildError::UndefinedState {
                    lexer: tag.to_owned(),
                    state: name.to_owned(),
                });
            };
            let compiled = rules
                .iter()
                .enumerate()
                .map(|(index, rule)| compiler.rule(name, index, rule))
                .collect::<Result<Vec<_>, _>>()?;
            states.push(CompiledState {
                name: name.to_owned(),
                rules: compiled,
            });
        }

        debug!(
            lexer = tag,
            states = states.len(),
            rules = states.iter().map(|s| s.rules.len()).sum::<usize>(),
            patterns = compiler.patterns.len(),
            "built lexer definition"
        );

        Ok(Lexer::from_parts(
            self.meta,
            states,
            start,
            self.start,
            self.on_start,
            self.keyword_sets,
            self.blueprint,
        ))
    }
}

/// Resolves and compiles the rules of one definition.
struct Compiler<'b> {
    tag: &'b str,
    blueprint: &'b Blueprint,
    keyword_sets: &'b FxHashMap<String, Arc<KeywordSet>>,
    /// Mixins copy rules, so the same pattern often shows up in several
    /// states.
    patterns: FxHashMap<PatternSpec, Arc<Pattern>>,
}

impl Compiler<'_> {
    fn rule(&mut self, state: &str, index: usize, rule: &RuleSpec) -> Result<CompiledRule, BuildError> {
        let pattern = self.pattern(state, index, &rule.pattern)?;
        let action = match &rule.action {
            Action::Emit(category) => CompiledAction::Emit(*category),
            Action::Groups(groups) => {
                if groups.len() != pattern.group_count() {
                    return Err(BuildError::GroupCount {
                        lexer: self.tag.to_owned(),
                        state: state.to_owned(),
                        rule: index,
                        expected: pattern.group_count(),
                        found: groups.len(),
                    });
                }
                let groups = groups
                    .iter()
                    .map(|group| {
                        Ok(CompiledGroup {
                            action: group.action.clone(),
                            next: self.transition(state, index, &group.next)?,
                        })
                    })
                    .collect::<Result<Vec<_>, BuildError>>()?;
                CompiledAction::Groups(groups)
            }
            Action::Classify(classify) => {
                let sets = classify
                    .sets
                    .iter()
                    .map(|(name, category)| match self.keyword_sets.get(name) {
                        Some(set) => Ok((Arc::clone(set), *category)),
                        None => Err(BuildError::UnknownKeywordSet {
                            lexer: self.tag.to_owned(),
                            state: state.to_owned(),
                            rule: index,
                            set: name.clone(),
                        }),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                CompiledAction::Classify {
                    sets,
                    fallback: classify.fallback,
                }
            }
            Action::Delegate(lexer) => CompiledAction::Delegate(Arc::clone(lexer)),
            Action::Callback(f) => CompiledAction::Callback(Arc::clone(f)),
        };
        Ok(CompiledRule {
            pattern,
            action,
            next: self.transition(state, index, &rule.next)?,
        })
    }

    fn pattern(
        &mut self,
        state: &str,
        index: usize,
        spec: &PatternSpec,
    ) -> Result<Arc<Pattern>, BuildError> {
        if let Some(pattern) = self.patterns.get(spec) {
            return Ok(Arc::clone(pattern));
        }
        let pattern = spec.compile().map_err(|source| BuildError::Pattern {
            lexer: self.tag.to_owned(),
            state: state.to_owned(),
            rule: index,
            source,
        })?;
        let pattern = Arc::new(pattern);
        self.patterns.insert(spec.clone(), Arc::clone(&pattern));
        Ok(pattern)
    }

    fn transition(&self, state: &str, index: usize, next: &Next) -> Result<Transition, BuildError> {
        let resolve = |target: &str| match self.blueprint.lookup(target) {
            Some(id) if self.blueprint.rules(target).is_some() => Ok(id),
            _ => Err(BuildError::UnknownTransition {
                lexer: self.tag.to_owned(),
                state: state.to_owned(),
                rule: index,
                target: target.to_owned(),
            }),
        };
        Ok(match next {
            Next::Stay => Transition::Stay,
            Next::Push(target) => Transition::Push(resolve(target.as_str())?),
            Next::PushSelf => Transition::PushSelf,
            Next::Pop(n) => Transition::Pop(*n),
            Next::Goto(target) => Transition::Goto(resolve(target.as_str())?),
            Next::Reset => Transition::Reset,
        })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
