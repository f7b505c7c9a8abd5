//! Data-driven object model scenarios.
//!
//! A scenario manifest (JSON) lists scenarios; each scenario is a sequence of
//! steps over named objects, named host functions and named value cells,
//! executed in a fresh realm.  The runner produces one structured log event
//! per scenario and a summary whose manifest hash pins the exact input.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::Path;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::{ConfigError, RealmConfig};
use crate::descriptor::{DescriptorFields, PropertyDescriptor, explicit_option};
use crate::error::{DefineErrorKind, ObjectError};
use crate::literal::ObjectLiteral;
use crate::realm::Realm;
use crate::value::{JsValue, ObjectHandle};

pub const COMPONENT: &str = "descriptor_conformance";

// ---------------------------------------------------------------------------
// Manifest model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioManifest {
    pub schema_version: String,
    pub scenarios: Vec<Scenario>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub steps: Vec<ScenarioStep>,
}

/// A value in a scenario.  Objects are referenced by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioValue {
    Undefined,
    Null,
    Nan,
    Infinity,
    Bool(bool),
    Number(f64),
    String(String),
    Object(String),
}

/// A descriptor literal whose accessor fields name functions.  `null`
/// stands for an explicit `undefined`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ScenarioValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writable: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "explicit_option"
    )]
    pub get: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "explicit_option"
    )]
    pub set: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enumerable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurable: Option<bool>,
}

/// What a scenario host function does when called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FunctionBehavior {
    ReturnConstant {
        value: ScenarioValue,
    },
    /// Return the cell's value, plus `plus` when given.
    ReadCell {
        cell: String,
        #[serde(default)]
        plus: Option<f64>,
    },
    /// Store the first argument in the cell.
    WriteCell {
        cell: String,
    },
}

/// One entry of an object initialiser; functions are referenced by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioLiteralEntry {
    Data { key: String, value: ScenarioValue },
    Getter { key: String, function: String },
    Setter { key: String, function: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScenarioStep {
    CreateObject {
        name: String,
        /// Named prototype; `Object.prototype` when absent.
        #[serde(default)]
        prototype: Option<String>,
        #[serde(default)]
        null_prototype: bool,
    },
    /// Evaluate an object initialiser.
    ObjectLiteral {
        name: String,
        entries: Vec<ScenarioLiteralEntry>,
    },
    CreateFunction {
        name: String,
        behavior: FunctionBehavior,
        /// Cell that receives `this` on every call.
        #[serde(default)]
        record_receiver: Option<String>,
    },
    Construct {
        name: String,
        function: String,
    },
    /// Name the object stored at `object[key]`.
    Bind {
        name: String,
        object: String,
        key: String,
    },
    SetCell {
        cell: String,
        value: ScenarioValue,
    },
    /// Relink a prototype; `null` clears it.  Cycles are allowed.
    SetPrototype {
        object: String,
        prototype: Option<String>,
    },
    Define {
        object: String,
        key: String,
        descriptor: ScenarioDescriptor,
        #[serde(default)]
        expect_error: Option<DefineErrorKind>,
    },
    Put {
        object: String,
        key: String,
        value: ScenarioValue,
        #[serde(default)]
        receiver: Option<String>,
    },
    Delete {
        object: String,
        key: String,
        expect: bool,
    },
    ExpectValue {
        object: String,
        key: String,
        value: ScenarioValue,
        #[serde(default)]
        receiver: Option<String>,
    },
    /// Compare the specified fields only; a missing descriptor expects the
    /// key to be absent.
    ExpectDescriptor {
        object: String,
        key: String,
        #[serde(default)]
        descriptor: Option<ScenarioDescriptor>,
    },
    ExpectKeys {
        object: String,
        keys: Vec<String>,
    },
    ExpectCell {
        cell: String,
        value: ScenarioValue,
    },
    ExpectReceiver {
        cell: String,
        object: String,
    },
}

impl ScenarioStep {
    pub fn op(&self) -> &'static str {
        match self {
            Self::CreateObject { .. } => "create_object",
            Self::ObjectLiteral { .. } => "object_literal",
            Self::CreateFunction { .. } => "create_function",
            Self::Construct { .. } => "construct",
            Self::Bind { .. } => "bind",
            Self::SetCell { .. } => "set_cell",
            Self::SetPrototype { .. } => "set_prototype",
            Self::Define { .. } => "define",
            Self::Put { .. } => "put",
            Self::Delete { .. } => "delete",
            Self::ExpectValue { .. } => "expect_value",
            Self::ExpectDescriptor { .. } => "expect_descriptor",
            Self::ExpectKeys { .. } => "expect_keys",
            Self::ExpectCell { .. } => "expect_cell",
            Self::ExpectReceiver { .. } => "expect_receiver",
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("failed to read scenario manifest: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse scenario manifest: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported scenario manifest schema: expected `{expected}`, got `{actual}`")]
    UnsupportedSchema { expected: String, actual: String },
    #[error("scenario manifest contains no scenarios")]
    EmptyScenarioSet,
    #[error("scenario id `{0}` is empty or duplicated")]
    InvalidScenarioId(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("conformance gate failed: failed={failed}, errored={errored}")]
pub struct ConformanceGateError {
    pub failed: usize,
    pub errored: usize,
}

const MISMATCH_CODE: &str = "OM-SCENARIO-0001";
const SETUP_CODE: &str = "OM-SCENARIO-0002";

/// Why a scenario stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StepFailure {
    /// An expectation did not hold.
    Mismatch(String),
    /// The scenario itself is broken (unknown name, bad handle).
    Setup { code: String, detail: String },
}

impl StepFailure {
    fn unknown(kind: &str, name: &str) -> Self {
        Self::Setup {
            code: SETUP_CODE.to_string(),
            detail: format!("unknown {kind} `{name}`"),
        }
    }
}

impl From<ObjectError> for StepFailure {
    fn from(err: ObjectError) -> Self {
        Self::Setup {
            code: err.error_code().to_string(),
            detail: err.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Manifest loading
// ---------------------------------------------------------------------------

impl ScenarioManifest {
    pub const CURRENT_SCHEMA: &'static str = "descriptor-engine.object-model-scenarios.v1";

    pub fn from_json_str(content: &str) -> Result<Self, ScenarioError> {
        let manifest: Self = serde_json::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.schema_version.trim() != Self::CURRENT_SCHEMA {
            return Err(ScenarioError::UnsupportedSchema {
                expected: Self::CURRENT_SCHEMA.to_string(),
                actual: self.schema_version.clone(),
            });
        }
        if self.scenarios.is_empty() {
            return Err(ScenarioError::EmptyScenarioSet);
        }
        let mut ids = BTreeSet::new();
        for scenario in &self.scenarios {
            if scenario.id.trim().is_empty() || !ids.insert(scenario.id.as_str()) {
                return Err(ScenarioError::InvalidScenarioId(scenario.id.clone()));
            }
        }
        Ok(())
    }

    /// SHA-256 of the manifest's serialized form.
    pub fn content_hash(&self) -> Result<String, ScenarioError> {
        let bytes = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}

// ---------------------------------------------------------------------------
// Run output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioLogEvent {
    pub trace_id: String,
    pub component: String,
    pub event: String,
    /// `pass`, `fail` or `error`.
    pub outcome: String,
    pub error_code: Option<String>,
    pub scenario_id: String,
    pub steps_run: usize,
    /// Index and op of the step that stopped the scenario.
    pub failed_step: Option<String>,
    pub error_detail: Option<String>,
    /// Object model events the realm recorded while running the scenario.
    pub realm_events: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConformanceRunSummary {
    pub run_id: String,
    pub manifest_hash: String,
    pub total_scenarios: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConformanceRunResult {
    pub run_id: String,
    pub manifest_hash: String,
    pub logs: Vec<ScenarioLogEvent>,
    pub summary: ConformanceRunSummary,
}

impl ConformanceRunResult {
    pub fn enforce_gate(&self) -> Result<(), ConformanceGateError> {
        if self.summary.failed > 0 || self.summary.errored > 0 {
            return Err(ConformanceGateError {
                failed: self.summary.failed,
                errored: self.summary.errored,
            });
        }
        Ok(())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioLogEvent> {
        self.logs.iter().filter(|log| log.outcome != "pass")
    }
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: RealmConfig,
}

impl ScenarioRunner {
    pub fn new(config: RealmConfig) -> Result<Self, ScenarioError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn run_path(&self, path: impl AsRef<Path>) -> Result<ConformanceRunResult, ScenarioError> {
        let manifest = ScenarioManifest::load(path)?;
        self.run(&manifest)
    }

    pub fn run(&self, manifest: &ScenarioManifest) -> Result<ConformanceRunResult, ScenarioError> {
        manifest.validate()?;
        let manifest_hash = manifest.content_hash()?;
        let run_id = format!("scenarios-{}", &manifest_hash[..12]);

        let mut logs = Vec::with_capacity(manifest.scenarios.len());
        let (mut passed, mut failed, mut errored) = (0usize, 0usize, 0usize);

        for (idx, scenario) in manifest.scenarios.iter().enumerate() {
            let trace_id = format!("{}-{:04}", self.config.trace_prefix, idx);
            let mut realm_config = self.config.clone();
            realm_config.trace_prefix = trace_id.clone();
            let realm = Realm::with_config(realm_config)?;

            let mut state = ScenarioState::new(realm);
            let mut steps_run = 0usize;
            let mut failure = None;
            for (step_idx, step) in scenario.steps.iter().enumerate() {
                steps_run += 1;
                if let Err(err) = state.execute(step) {
                    failure = Some((format!("{step_idx}:{}", step.op()), err));
                    break;
                }
            }
            let realm_events = state.realm.drain_events().len();

            let (outcome, error_code, failed_step, error_detail) = match failure {
                None => {
                    passed += 1;
                    ("pass", None, None, None)
                }
                Some((at, StepFailure::Mismatch(detail))) => {
                    failed += 1;
                    ("fail", Some(MISMATCH_CODE.to_string()), Some(at), Some(detail))
                }
                Some((at, StepFailure::Setup { code, detail })) => {
                    errored += 1;
                    ("error", Some(code), Some(at), Some(detail))
                }
            };

            logs.push(ScenarioLogEvent {
                trace_id,
                component: COMPONENT.to_string(),
                event: "scenario".to_string(),
                outcome: outcome.to_string(),
                error_code,
                scenario_id: scenario.id.clone(),
                steps_run,
                failed_step,
                error_detail,
                realm_events,
            });
        }

        let summary = ConformanceRunSummary {
            run_id: run_id.clone(),
            manifest_hash: manifest_hash.clone(),
            total_scenarios: logs.len(),
            passed,
            failed,
            errored,
        };
        Ok(ConformanceRunResult {
            run_id,
            manifest_hash,
            logs,
            summary,
        })
    }
}

type Cells = Rc<RefCell<BTreeMap<String, JsValue>>>;

struct ScenarioState {
    realm: Realm,
    names: BTreeMap<String, ObjectHandle>,
    cells: Cells,
}

impl ScenarioState {
    fn new(realm: Realm) -> Self {
        let intrinsics = *realm.intrinsics();
        let names = BTreeMap::from([
            ("global".to_string(), intrinsics.global),
            ("Math".to_string(), intrinsics.math),
            ("Object.prototype".to_string(), intrinsics.object_prototype),
            ("Function.prototype".to_string(), intrinsics.function_prototype),
            ("Array.prototype".to_string(), intrinsics.array_prototype),
        ]);
        Self {
            realm,
            names,
            cells: Rc::new(RefCell::new(BTreeMap::new())),
        }
    }

    fn object(&self, name: &str) -> Result<ObjectHandle, StepFailure> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| StepFailure::unknown("object", name))
    }

    fn value(&self, value: &ScenarioValue) -> Result<JsValue, StepFailure> {
        Ok(match value {
            ScenarioValue::Undefined => JsValue::Undefined,
            ScenarioValue::Null => JsValue::Null,
            ScenarioValue::Nan => JsValue::Number(f64::NAN),
            ScenarioValue::Infinity => JsValue::Number(f64::INFINITY),
            ScenarioValue::Bool(b) => JsValue::Bool(*b),
            ScenarioValue::Number(n) => JsValue::Number(*n),
            ScenarioValue::String(s) => JsValue::Str(s.clone()),
            ScenarioValue::Object(name) => JsValue::Object(self.object(name)?),
        })
    }

    fn object_ref(&self, name: &Option<String>) -> Result<Option<ObjectHandle>, StepFailure> {
        name.as_deref().map(|n| self.object(n)).transpose()
    }

    fn fields(&self, literal: &ScenarioDescriptor) -> Result<DescriptorFields, StepFailure> {
        Ok(DescriptorFields {
            value: literal.value.as_ref().map(|v| self.value(v)).transpose()?,
            writable: literal.writable,
            get: literal.get.as_ref().map(|g| self.object_ref(g)).transpose()?,
            set: literal.set.as_ref().map(|s| self.object_ref(s)).transpose()?,
            enumerable: literal.enumerable,
            configurable: literal.configurable,
        })
    }

    fn receiver(&self, object: ObjectHandle, receiver: &Option<String>) -> Result<JsValue, StepFailure> {
        Ok(JsValue::Object(match receiver {
            Some(name) => self.object(name)?,
            None => object,
        }))
    }

    fn cell(&self, name: &str) -> JsValue {
        self.cells.borrow().get(name).cloned().unwrap_or_default()
    }

    fn execute(&mut self, step: &ScenarioStep) -> Result<(), StepFailure> {
        match step {
            ScenarioStep::CreateObject {
                name,
                prototype,
                null_prototype,
            } => {
                let handle = match (prototype, null_prototype) {
                    (_, true) => self.realm.create_object(None)?,
                    (Some(proto), false) => {
                        let proto = self.object(proto)?;
                        self.realm.create_object(Some(proto))?
                    }
                    (None, false) => self.realm.new_object(),
                };
                self.names.insert(name.clone(), handle);
            }
            ScenarioStep::ObjectLiteral { name, entries } => {
                let mut literal = ObjectLiteral::new();
                for entry in entries {
                    literal = match entry {
                        ScenarioLiteralEntry::Data { key, value } => {
                            literal.data(key.as_str(), self.value(value)?)
                        }
                        ScenarioLiteralEntry::Getter { key, function } => {
                            literal.getter(key.as_str(), self.object(function)?)
                        }
                        ScenarioLiteralEntry::Setter { key, function } => {
                            literal.setter(key.as_str(), self.object(function)?)
                        }
                    };
                }
                let handle = literal.build(&mut self.realm)?;
                self.names.insert(name.clone(), handle);
            }
            ScenarioStep::CreateFunction {
                name,
                behavior,
                record_receiver,
            } => {
                let handle = self.create_function(name, behavior, record_receiver.clone())?;
                self.names.insert(name.clone(), handle);
            }
            ScenarioStep::Construct { name, function } => {
                let function = self.object(function)?;
                let handle = self.realm.construct(function, &[])?;
                self.names.insert(name.clone(), handle);
            }
            ScenarioStep::Bind { name, object, key } => {
                let object = self.object(object)?;
                match self.realm.get_value(object, key.as_str())? {
                    JsValue::Object(handle) => {
                        self.names.insert(name.clone(), handle);
                    }
                    other => {
                        return Err(StepFailure::Setup {
                            code: SETUP_CODE.to_string(),
                            detail: format!("`{key}` holds {other}, not an object"),
                        });
                    }
                }
            }
            ScenarioStep::SetCell { cell, value } => {
                let value = self.value(value)?;
                self.cells.borrow_mut().insert(cell.clone(), value);
            }
            ScenarioStep::SetPrototype { object, prototype } => {
                let object = self.object(object)?;
                let prototype = self.object_ref(prototype)?;
                self.realm.set_prototype_of(object, prototype)?;
            }
            ScenarioStep::Define {
                object,
                key,
                descriptor,
                expect_error,
            } => {
                let object = self.object(object)?;
                let fields = self.fields(descriptor)?;
                let result = self.realm.define_own_property(object, key.as_str(), fields);
                match (result, expect_error) {
                    (Ok(_), None) => {}
                    (Ok(outcome), Some(expected)) => {
                        return Err(StepFailure::Mismatch(format!(
                            "define `{key}` was {}, expected {}",
                            outcome.as_str(),
                            expected.error_code()
                        )));
                    }
                    (Err(err), Some(expected)) if err.define_kind() == Some(*expected) => {}
                    (Err(err), _) => {
                        return Err(StepFailure::Mismatch(format!(
                            "define `{key}` failed with {}: {err}",
                            err.error_code()
                        )));
                    }
                }
            }
            ScenarioStep::Put {
                object,
                key,
                value,
                receiver,
            } => {
                let handle = self.object(object)?;
                let receiver = self.receiver(handle, receiver)?;
                let value = self.value(value)?;
                self.realm.put(handle, key.as_str(), value, &receiver)?;
            }
            ScenarioStep::Delete {
                object,
                key,
                expect,
            } => {
                let object = self.object(object)?;
                let deleted = self.realm.delete_own(object, key.as_str())?;
                if deleted != *expect {
                    return Err(StepFailure::Mismatch(format!(
                        "delete `{key}` returned {deleted}, expected {expect}"
                    )));
                }
            }
            ScenarioStep::ExpectValue {
                object,
                key,
                value,
                receiver,
            } => {
                let handle = self.object(object)?;
                let receiver = self.receiver(handle, receiver)?;
                let expected = self.value(value)?;
                let actual = self.realm.get(handle, key.as_str(), &receiver)?;
                if !actual.same_value(&expected) {
                    return Err(StepFailure::Mismatch(format!(
                        "`{object}.{key}` is {actual}, expected {expected}"
                    )));
                }
            }
            ScenarioStep::ExpectDescriptor {
                object,
                key,
                descriptor,
            } => {
                let handle = self.object(object)?;
                let actual = self.realm.get_own_property_descriptor(handle, key.as_str())?;
                match (descriptor, actual) {
                    (None, None) => {}
                    (None, Some(actual)) => {
                        return Err(StepFailure::Mismatch(format!(
                            "`{object}.{key}` exists ({actual:?}), expected absent"
                        )));
                    }
                    (Some(_), None) => {
                        return Err(StepFailure::Mismatch(format!(
                            "`{object}.{key}` is absent"
                        )));
                    }
                    (Some(literal), Some(actual)) => {
                        let expected = self.fields(literal)?;
                        if !fields_match(&expected, &actual) {
                            return Err(StepFailure::Mismatch(format!(
                                "`{object}.{key}` is {actual:?}, expected {expected:?}"
                            )));
                        }
                    }
                }
            }
            ScenarioStep::ExpectKeys { object, keys } => {
                let handle = self.object(object)?;
                let actual: Vec<String> = self
                    .realm
                    .enumerate_keys(handle)?
                    .iter()
                    .map(|k| k.as_str().to_string())
                    .collect();
                if actual != *keys {
                    return Err(StepFailure::Mismatch(format!(
                        "keys of `{object}` are {actual:?}, expected {keys:?}"
                    )));
                }
            }
            ScenarioStep::ExpectCell { cell, value } => {
                let expected = self.value(value)?;
                let actual = self.cell(cell);
                if !actual.same_value(&expected) {
                    return Err(StepFailure::Mismatch(format!(
                        "cell `{cell}` is {actual}, expected {expected}"
                    )));
                }
            }
            ScenarioStep::ExpectReceiver { cell, object } => {
                let expected = JsValue::Object(self.object(object)?);
                let actual = self.cell(cell);
                if actual != expected {
                    return Err(StepFailure::Mismatch(format!(
                        "receiver in `{cell}` is {actual}, expected `{object}`"
                    )));
                }
            }
        }
        Ok(())
    }

    fn create_function(
        &mut self,
        name: &str,
        behavior: &FunctionBehavior,
        record_receiver: Option<String>,
    ) -> Result<ObjectHandle, StepFailure> {
        enum Body {
            Constant(JsValue),
            Read(String, Option<f64>),
            Write(String),
        }
        let body = match behavior {
            FunctionBehavior::ReturnConstant { value } => Body::Constant(self.value(value)?),
            FunctionBehavior::ReadCell { cell, plus } => Body::Read(cell.clone(), *plus),
            FunctionBehavior::WriteCell { cell } => Body::Write(cell.clone()),
        };
        let cells = Rc::clone(&self.cells);
        Ok(self.realm.create_function(name, move |_, this, args| {
            let mut cells = cells.borrow_mut();
            if let Some(target) = &record_receiver {
                cells.insert(target.clone(), this.clone());
            }
            Ok(match &body {
                Body::Constant(value) => value.clone(),
                Body::Read(cell, plus) => {
                    let value = cells.get(cell).cloned().unwrap_or_default();
                    match plus {
                        Some(n) => JsValue::Number(value.to_number() + n),
                        None => value,
                    }
                }
                Body::Write(cell) => {
                    let value = args.first().cloned().unwrap_or_default();
                    cells.insert(cell.clone(), value);
                    JsValue::Undefined
                }
            })
        }))
    }
}

/// Every field specified in `expected` matches `actual`.
fn fields_match(expected: &DescriptorFields, actual: &PropertyDescriptor) -> bool {
    let actual = DescriptorFields::from(actual);
    let value_ok = match (&expected.value, &actual.value) {
        (None, _) => true,
        (Some(e), Some(a)) => e.same_value(a),
        (Some(_), None) => false,
    };
    value_ok
        && expected.writable.is_none_or(|w| actual.writable == Some(w))
        && expected.get.is_none_or(|g| actual.get == Some(g))
        && expected.set.is_none_or(|s| actual.set == Some(s))
        && expected.enumerable.is_none_or(|e| actual.enumerable == Some(e))
        && expected.configurable.is_none_or(|c| actual.configurable == Some(c))
}

/// Run a manifest file with the default realm configuration.
pub fn run_manifest_path(path: impl AsRef<Path>) -> Result<ConformanceRunResult, ScenarioError> {
    ScenarioRunner::default().run_path(path)
}
