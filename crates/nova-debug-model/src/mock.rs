//! Deterministic, in-memory debug model for tests.
//!
//! Every mock carries a [`MockFaults`] table so a test can make a single
//! accessor fail (e.g. "the value string of this object is no longer
//! available") while the rest of the element keeps answering.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    BreakpointKind, ClassPrepareMemberType, DebugFault, JavaBreakpoint, JavaDebugTarget,
    JavaExpression, JavaStackFrame, JavaThread, JavaValue, JavaVariable, JavaWatchExpression,
    ModelResult, ObjectId, ProblemMarker, SuspendPolicy, TargetId, ThreadId, ValueKind,
    Visibility, JAVA_STRATUM, STRING_TYPE_NAME,
};

/// Per-accessor fault injection, keyed by the trait method name.
#[derive(Clone, Debug, Default)]
pub struct MockFaults(HashMap<&'static str, DebugFault>);

impl MockFaults {
    pub fn insert(&mut self, accessor: &'static str, fault: DebugFault) {
        self.0.insert(accessor, fault);
    }

    pub fn check(&self, accessor: &str) -> ModelResult<()> {
        match self.0.get(accessor) {
            Some(fault) => Err(fault.clone()),
            None => Ok(()),
        }
    }
}

pub struct MockTarget {
    pub id: TargetId,
    pub name: String,
    pub suspended: bool,
    pub terminated: bool,
    pub disconnected: bool,
    pub out_of_synch: bool,
    pub may_be_out_of_synch: bool,
    pub threads: Vec<Arc<MockThread>>,
    pub faults: MockFaults,
}

impl MockTarget {
    pub fn new(id: TargetId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            suspended: false,
            terminated: false,
            disconnected: false,
            out_of_synch: false,
            may_be_out_of_synch: false,
            threads: Vec::new(),
            faults: MockFaults::default(),
        }
    }

    pub fn with_thread(mut self, thread: Arc<MockThread>) -> Self {
        self.threads.push(thread);
        self
    }

    pub fn failing(mut self, accessor: &'static str, fault: DebugFault) -> Self {
        self.faults.insert(accessor, fault);
        self
    }
}

impl JavaDebugTarget for MockTarget {
    fn id(&self) -> TargetId {
        self.id
    }

    fn name(&self) -> ModelResult<String> {
        self.faults.check("name")?;
        Ok(self.name.clone())
    }

    fn is_suspended(&self) -> bool {
        self.suspended
    }

    fn is_terminated(&self) -> bool {
        self.terminated
    }

    fn is_disconnected(&self) -> bool {
        self.disconnected
    }

    fn is_out_of_synch(&self) -> ModelResult<bool> {
        self.faults.check("is_out_of_synch")?;
        Ok(self.out_of_synch)
    }

    fn may_be_out_of_synch(&self) -> ModelResult<bool> {
        self.faults.check("may_be_out_of_synch")?;
        Ok(self.may_be_out_of_synch)
    }

    fn threads(&self) -> ModelResult<Vec<Arc<dyn JavaThread>>> {
        self.faults.check("threads")?;
        Ok(self
            .threads
            .iter()
            .map(|thread| thread.clone() as Arc<dyn JavaThread>)
            .collect())
    }
}

pub struct MockThread {
    pub id: ThreadId,
    pub target_id: TargetId,
    pub name: String,
    pub suspended: bool,
    pub suspended_quiet: bool,
    pub stepping: bool,
    pub terminated: bool,
    pub evaluating: bool,
    pub system: bool,
    pub out_of_synch: bool,
    pub may_be_out_of_synch: bool,
    pub in_deadlock: bool,
    pub breakpoints: Vec<Arc<dyn JavaBreakpoint>>,
    pub top_frame: Option<Arc<MockStackFrame>>,
    /// When false, `invoke_to_string` reports [`DebugFault::Unsupported`].
    pub to_string_supported: bool,
    pub snippets: HashMap<String, Arc<MockValue>>,
    pub faults: MockFaults,
    to_string_calls: Mutex<usize>,
}

impl MockThread {
    pub fn new(id: ThreadId, target_id: TargetId, name: impl Into<String>) -> Self {
        Self {
            id,
            target_id,
            name: name.into(),
            suspended: false,
            suspended_quiet: false,
            stepping: false,
            terminated: false,
            evaluating: false,
            system: false,
            out_of_synch: false,
            may_be_out_of_synch: false,
            in_deadlock: false,
            breakpoints: Vec::new(),
            top_frame: None,
            to_string_supported: true,
            snippets: HashMap::new(),
            faults: MockFaults::default(),
            to_string_calls: Mutex::new(0),
        }
    }

    pub fn suspended(mut self) -> Self {
        self.suspended = true;
        self
    }

    pub fn system(mut self) -> Self {
        self.system = true;
        self
    }

    pub fn with_breakpoint(mut self, breakpoint: Arc<dyn JavaBreakpoint>) -> Self {
        self.breakpoints.push(breakpoint);
        self
    }

    pub fn with_top_frame(mut self, frame: Arc<MockStackFrame>) -> Self {
        self.top_frame = Some(frame);
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>, result: Arc<MockValue>) -> Self {
        self.snippets.insert(snippet.into(), result);
        self
    }

    pub fn failing(mut self, accessor: &'static str, fault: DebugFault) -> Self {
        self.faults.insert(accessor, fault);
        self
    }

    /// Number of `toString()` invocations performed on this thread.
    pub fn to_string_calls(&self) -> usize {
        *self.to_string_calls.lock()
    }
}

impl JavaThread for MockThread {
    fn id(&self) -> ThreadId {
        self.id
    }

    fn target_id(&self) -> TargetId {
        self.target_id
    }

    fn name(&self) -> ModelResult<String> {
        self.faults.check("name")?;
        Ok(self.name.clone())
    }

    fn is_suspended(&self) -> bool {
        self.suspended
    }

    fn is_suspended_quiet(&self) -> bool {
        self.suspended_quiet
    }

    fn is_stepping(&self) -> bool {
        self.stepping
    }

    fn is_terminated(&self) -> bool {
        self.terminated
    }

    fn is_performing_evaluation(&self) -> bool {
        self.evaluating
    }

    fn is_system_thread(&self) -> ModelResult<bool> {
        self.faults.check("is_system_thread")?;
        Ok(self.system)
    }

    fn is_out_of_synch(&self) -> ModelResult<bool> {
        self.faults.check("is_out_of_synch")?;
        Ok(self.out_of_synch)
    }

    fn may_be_out_of_synch(&self) -> ModelResult<bool> {
        self.faults.check("may_be_out_of_synch")?;
        Ok(self.may_be_out_of_synch)
    }

    fn is_in_deadlock(&self) -> bool {
        self.in_deadlock
    }

    fn breakpoints(&self) -> Vec<Arc<dyn JavaBreakpoint>> {
        self.breakpoints.clone()
    }

    fn top_frame(&self) -> ModelResult<Option<Arc<dyn JavaStackFrame>>> {
        self.faults.check("top_frame")?;
        Ok(self
            .top_frame
            .clone()
            .map(|frame| frame as Arc<dyn JavaStackFrame>))
    }

    fn invoke_to_string(&self, value: &dyn JavaValue) -> ModelResult<String> {
        self.faults.check("invoke_to_string")?;
        if !self.to_string_supported {
            return Err(DebugFault::Unsupported(
                "mock thread cannot invoke methods".to_string(),
            ));
        }
        *self.to_string_calls.lock() += 1;
        value.value_string()
    }

    fn evaluate_snippet(
        &self,
        snippet: &str,
        _receiver: &dyn JavaValue,
    ) -> ModelResult<Arc<dyn JavaValue>> {
        self.faults.check("evaluate_snippet")?;
        match self.snippets.get(snippet) {
            Some(result) => Ok(result.clone() as Arc<dyn JavaValue>),
            None => Err(DebugFault::Internal(format!(
                "no mock evaluation result configured for `{snippet}`"
            ))),
        }
    }
}

#[derive(Clone)]
pub struct MockStackFrame {
    pub thread_id: ThreadId,
    pub declaring_type: String,
    pub receiving_type: String,
    pub method_name: String,
    pub argument_types: Vec<String>,
    pub var_args: bool,
    pub line_number: i32,
    pub native: bool,
    pub obsolete: bool,
    pub out_of_synch: bool,
    pub synchronized: bool,
    pub stratum: String,
    pub source_name: String,
    pub source_path: String,
    pub locals_available: bool,
    pub problem: Option<ProblemMarker>,
    pub faults: MockFaults,
}

impl MockStackFrame {
    pub fn new(
        thread_id: ThreadId,
        type_name: impl Into<String>,
        method_name: impl Into<String>,
        line_number: i32,
    ) -> Self {
        let type_name = type_name.into();
        let simple = type_name.rsplit('.').next().unwrap_or(&type_name).to_string();
        Self {
            thread_id,
            declaring_type: type_name.clone(),
            receiving_type: type_name.clone(),
            method_name: method_name.into(),
            argument_types: Vec::new(),
            var_args: false,
            line_number,
            native: false,
            obsolete: false,
            out_of_synch: false,
            synchronized: false,
            stratum: JAVA_STRATUM.to_string(),
            source_name: format!("{simple}.java"),
            source_path: format!("{}.java", type_name.replace('.', "/")),
            locals_available: true,
            problem: None,
            faults: MockFaults::default(),
        }
    }

    pub fn with_arguments<I, S>(mut self, argument_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.argument_types = argument_types.into_iter().map(Into::into).collect();
        self
    }

    pub fn failing(mut self, accessor: &'static str, fault: DebugFault) -> Self {
        self.faults.insert(accessor, fault);
        self
    }
}

impl JavaStackFrame for MockStackFrame {
    fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    fn declaring_type_name(&self) -> ModelResult<String> {
        self.faults.check("declaring_type_name")?;
        Ok(self.declaring_type.clone())
    }

    fn receiving_type_name(&self) -> ModelResult<String> {
        self.faults.check("receiving_type_name")?;
        Ok(self.receiving_type.clone())
    }

    fn method_name(&self) -> ModelResult<String> {
        self.faults.check("method_name")?;
        Ok(self.method_name.clone())
    }

    fn argument_type_names(&self) -> ModelResult<Vec<String>> {
        self.faults.check("argument_type_names")?;
        Ok(self.argument_types.clone())
    }

    fn is_var_args(&self) -> ModelResult<bool> {
        self.faults.check("is_var_args")?;
        Ok(self.var_args)
    }

    fn line_number(&self) -> ModelResult<i32> {
        self.faults.check("line_number")?;
        Ok(self.line_number)
    }

    fn is_native(&self) -> ModelResult<bool> {
        self.faults.check("is_native")?;
        Ok(self.native)
    }

    fn is_obsolete(&self) -> ModelResult<bool> {
        self.faults.check("is_obsolete")?;
        Ok(self.obsolete)
    }

    fn is_out_of_synch(&self) -> ModelResult<bool> {
        self.faults.check("is_out_of_synch")?;
        Ok(self.out_of_synch)
    }

    fn is_synchronized(&self) -> ModelResult<bool> {
        self.faults.check("is_synchronized")?;
        Ok(self.synchronized)
    }

    fn default_stratum(&self) -> ModelResult<String> {
        self.faults.check("default_stratum")?;
        Ok(self.stratum.clone())
    }

    fn source_name(&self) -> ModelResult<String> {
        self.faults.check("source_name")?;
        Ok(self.source_name.clone())
    }

    fn source_path(&self) -> ModelResult<String> {
        self.faults.check("source_path")?;
        Ok(self.source_path.clone())
    }

    fn were_locals_available(&self) -> bool {
        self.locals_available
    }

    fn problem(&self) -> ModelResult<Option<ProblemMarker>> {
        self.faults.check("problem")?;
        Ok(self.problem.clone())
    }
}

#[derive(Clone)]
pub struct MockValue {
    pub kind: ValueKind,
    pub target: Option<Arc<MockTarget>>,
    pub reference_type_name: String,
    pub value_string: String,
    pub signature: Option<String>,
    pub array_length: Option<usize>,
    pub allocated: bool,
    pub referring: Vec<Arc<MockValue>>,
    pub faults: MockFaults,
}

impl MockValue {
    pub fn primitive(
        signature: &str,
        type_name: &str,
        value_string: impl Into<String>,
    ) -> Self {
        Self {
            kind: ValueKind::Primitive,
            target: None,
            reference_type_name: type_name.to_string(),
            value_string: value_string.into(),
            signature: Some(signature.to_string()),
            array_length: None,
            allocated: true,
            referring: Vec::new(),
            faults: MockFaults::default(),
        }
    }

    pub fn boolean(value: bool) -> Self {
        Self::primitive("Z", "boolean", value.to_string())
    }

    pub fn byte(value: i8) -> Self {
        Self::primitive("B", "byte", value.to_string())
    }

    pub fn short(value: i16) -> Self {
        Self::primitive("S", "short", value.to_string())
    }

    pub fn char(value: char) -> Self {
        Self::primitive("C", "char", value.to_string())
    }

    pub fn int(value: i32) -> Self {
        Self::primitive("I", "int", value.to_string())
    }

    pub fn long(value: i64) -> Self {
        Self::primitive("J", "long", value.to_string())
    }

    pub fn void() -> Self {
        Self::primitive("V", "void", "")
    }

    pub fn string(value: &str) -> Self {
        Self {
            kind: ValueKind::Object,
            reference_type_name: STRING_TYPE_NAME.to_string(),
            signature: Some("Ljava/lang/String;".to_string()),
            ..Self::primitive("", "", value)
        }
    }

    /// An object of `type_name`, rendered by the VM as `(id=N)`.
    pub fn object(type_name: &str, id: ObjectId) -> Self {
        Self {
            kind: ValueKind::Object,
            reference_type_name: type_name.to_string(),
            signature: Some(format!("L{};", type_name.replace('.', "/"))),
            ..Self::primitive("", "", format!("(id={id})"))
        }
    }

    pub fn array(type_name: &str, signature: &str, length: usize, id: ObjectId) -> Self {
        Self {
            kind: ValueKind::Array,
            reference_type_name: type_name.to_string(),
            signature: Some(signature.to_string()),
            array_length: Some(length),
            ..Self::primitive("", "", format!("(id={id})"))
        }
    }

    pub fn null() -> Self {
        Self {
            kind: ValueKind::Object,
            reference_type_name: "null".to_string(),
            signature: None,
            ..Self::primitive("", "", "null")
        }
    }

    pub fn reference_list(referring: Vec<Arc<MockValue>>) -> Self {
        Self {
            kind: ValueKind::ReferenceList,
            reference_type_name: "java.lang.Object[]".to_string(),
            signature: Some("[Ljava/lang/Object;".to_string()),
            referring,
            ..Self::primitive("", "", "")
        }
    }

    pub fn with_target(mut self, target: Arc<MockTarget>) -> Self {
        self.target = Some(target);
        self
    }

    pub fn failing(mut self, accessor: &'static str, fault: DebugFault) -> Self {
        self.faults.insert(accessor, fault);
        self
    }
}

impl JavaValue for MockValue {
    fn kind(&self) -> ValueKind {
        self.kind
    }

    fn debug_target(&self) -> Option<Arc<dyn JavaDebugTarget>> {
        self.target
            .clone()
            .map(|target| target as Arc<dyn JavaDebugTarget>)
    }

    fn reference_type_name(&self) -> ModelResult<String> {
        self.faults.check("reference_type_name")?;
        Ok(self.reference_type_name.clone())
    }

    fn value_string(&self) -> ModelResult<String> {
        self.faults.check("value_string")?;
        Ok(self.value_string.clone())
    }

    fn signature(&self) -> ModelResult<Option<String>> {
        self.faults.check("signature")?;
        Ok(self.signature.clone())
    }

    fn is_allocated(&self) -> ModelResult<bool> {
        self.faults.check("is_allocated")?;
        Ok(self.allocated)
    }

    fn array_length(&self) -> ModelResult<usize> {
        self.faults.check("array_length")?;
        self.array_length
            .ok_or_else(|| DebugFault::Unsupported("value is not an array".to_string()))
    }

    fn referring_objects(&self) -> ModelResult<Vec<Arc<dyn JavaValue>>> {
        self.faults.check("referring_objects")?;
        if self.kind != ValueKind::ReferenceList {
            return Err(DebugFault::Unsupported(
                "value is not a reference list".to_string(),
            ));
        }
        Ok(self
            .referring
            .iter()
            .map(|value| value.clone() as Arc<dyn JavaValue>)
            .collect())
    }
}

#[derive(Clone, Debug, Default)]
pub struct MockField {
    pub declaring_type: String,
    pub receiving_type_field_names: Vec<String>,
}

#[derive(Clone)]
pub struct MockVariable {
    pub name: String,
    pub value: Arc<MockValue>,
    pub reference_type_name: String,
    pub visibility: Visibility,
    pub is_final: bool,
    pub is_static: bool,
    pub field: Option<MockField>,
    pub faults: MockFaults,
}

impl MockVariable {
    /// A local variable declared with the value's own type.
    pub fn local(name: impl Into<String>, value: MockValue) -> Self {
        Self {
            name: name.into(),
            reference_type_name: value.reference_type_name.clone(),
            value: Arc::new(value),
            visibility: Visibility::Local,
            is_final: false,
            is_static: false,
            field: None,
            faults: MockFaults::default(),
        }
    }

    pub fn field(
        name: impl Into<String>,
        value: MockValue,
        visibility: Visibility,
        field: MockField,
    ) -> Self {
        Self {
            visibility,
            field: Some(field),
            ..Self::local(name, value)
        }
    }

    pub fn failing(mut self, accessor: &'static str, fault: DebugFault) -> Self {
        self.faults.insert(accessor, fault);
        self
    }
}

impl JavaVariable for MockVariable {
    fn name(&self) -> ModelResult<String> {
        self.faults.check("name")?;
        Ok(self.name.clone())
    }

    fn value(&self) -> ModelResult<Arc<dyn JavaValue>> {
        self.faults.check("value")?;
        Ok(self.value.clone() as Arc<dyn JavaValue>)
    }

    fn reference_type_name(&self) -> ModelResult<String> {
        self.faults.check("reference_type_name")?;
        Ok(self.reference_type_name.clone())
    }

    fn visibility(&self) -> ModelResult<Visibility> {
        self.faults.check("visibility")?;
        Ok(self.visibility)
    }

    fn is_final(&self) -> ModelResult<bool> {
        self.faults.check("is_final")?;
        Ok(self.is_final)
    }

    fn is_static(&self) -> ModelResult<bool> {
        self.faults.check("is_static")?;
        Ok(self.is_static)
    }

    fn is_field(&self) -> bool {
        self.field.is_some()
    }

    fn declaring_type_name(&self) -> ModelResult<String> {
        self.faults.check("declaring_type_name")?;
        match &self.field {
            Some(field) => Ok(field.declaring_type.clone()),
            None => Err(DebugFault::Unsupported("variable is not a field".to_string())),
        }
    }

    fn receiving_type_field_names(&self) -> ModelResult<Vec<String>> {
        self.faults.check("receiving_type_field_names")?;
        match &self.field {
            Some(field) => Ok(field.receiving_type_field_names.clone()),
            None => Err(DebugFault::Unsupported("variable is not a field".to_string())),
        }
    }
}

#[derive(Clone)]
pub struct MockBreakpoint {
    pub kind: BreakpointKind,
    pub marker_exists: bool,
    pub problem: bool,
    pub type_name: String,
    pub resource_name: Option<String>,
    pub member_label: Option<String>,
    pub enabled: bool,
    pub installed: bool,
    pub hit_count: i32,
    pub suspend_policy: SuspendPolicy,
    pub thread_filters: Vec<ThreadId>,
    pub instance_filters: Vec<Arc<MockValue>>,
    pub line_number: i32,
    pub source_name: Option<String>,
    pub condition: Option<String>,
    pub condition_enabled: bool,
    pub run_to_line: bool,
    pub method_name: Option<String>,
    pub method_signature: Option<String>,
    pub entry: bool,
    pub exit: bool,
    pub entry_suspend: bool,
    pub field_name: String,
    pub access: bool,
    pub modification: bool,
    pub access_suspend: bool,
    pub caught: bool,
    pub uncaught: bool,
    pub checked: bool,
    pub exception_type_name: Option<String>,
    pub inclusion_filters: Vec<String>,
    pub exclusion_filters: Vec<String>,
    pub member_type: ClassPrepareMemberType,
    pub faults: MockFaults,
}

impl MockBreakpoint {
    pub fn new(kind: BreakpointKind, type_name: impl Into<String>) -> Self {
        Self {
            kind,
            marker_exists: true,
            problem: false,
            type_name: type_name.into(),
            resource_name: None,
            member_label: None,
            enabled: true,
            installed: false,
            hit_count: 0,
            suspend_policy: SuspendPolicy::Thread,
            thread_filters: Vec::new(),
            instance_filters: Vec::new(),
            line_number: -1,
            source_name: None,
            condition: None,
            condition_enabled: false,
            run_to_line: false,
            method_name: None,
            method_signature: None,
            entry: false,
            exit: false,
            entry_suspend: false,
            field_name: String::new(),
            access: false,
            modification: false,
            access_suspend: false,
            caught: false,
            uncaught: false,
            checked: false,
            exception_type_name: None,
            inclusion_filters: Vec::new(),
            exclusion_filters: Vec::new(),
            member_type: ClassPrepareMemberType::Class,
            faults: MockFaults::default(),
        }
    }

    pub fn line(type_name: impl Into<String>, line_number: i32) -> Self {
        Self {
            line_number,
            ..Self::new(BreakpointKind::Line, type_name)
        }
    }

    pub fn method(
        type_name: impl Into<String>,
        method_name: impl Into<String>,
        signature: Option<&str>,
    ) -> Self {
        Self {
            method_name: Some(method_name.into()),
            method_signature: signature.map(str::to_string),
            entry: true,
            ..Self::new(BreakpointKind::Method, type_name)
        }
    }

    pub fn watchpoint(type_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            access: true,
            modification: true,
            ..Self::new(BreakpointKind::Watchpoint, type_name)
        }
    }

    pub fn exception(type_name: impl Into<String>, caught: bool, uncaught: bool) -> Self {
        Self {
            caught,
            uncaught,
            checked: true,
            ..Self::new(BreakpointKind::Exception, type_name)
        }
    }

    pub fn class_prepare(type_name: impl Into<String>) -> Self {
        Self::new(BreakpointKind::ClassPrepare, type_name)
    }

    pub fn pattern(resource_name: impl Into<String>, line_number: i32) -> Self {
        Self {
            resource_name: Some(resource_name.into()),
            line_number,
            ..Self::new(BreakpointKind::Pattern, "")
        }
    }

    pub fn target_pattern(source_name: impl Into<String>, line_number: i32) -> Self {
        Self {
            source_name: Some(source_name.into()),
            line_number,
            ..Self::new(BreakpointKind::TargetPattern, "")
        }
    }

    pub fn stratum_line(source_name: Option<&str>, line_number: i32) -> Self {
        Self {
            source_name: source_name.map(str::to_string),
            line_number,
            ..Self::new(BreakpointKind::StratumLine, "")
        }
    }

    pub fn failing(mut self, accessor: &'static str, fault: DebugFault) -> Self {
        self.faults.insert(accessor, fault);
        self
    }
}

impl JavaBreakpoint for MockBreakpoint {
    fn kind(&self) -> BreakpointKind {
        self.kind
    }

    fn marker_exists(&self) -> bool {
        self.marker_exists
    }

    fn is_problem(&self) -> bool {
        self.problem
    }

    fn type_name(&self) -> ModelResult<String> {
        self.faults.check("type_name")?;
        Ok(self.type_name.clone())
    }

    fn resource_name(&self) -> ModelResult<Option<String>> {
        self.faults.check("resource_name")?;
        Ok(self.resource_name.clone())
    }

    fn member_label(&self) -> ModelResult<Option<String>> {
        self.faults.check("member_label")?;
        Ok(self.member_label.clone())
    }

    fn is_enabled(&self) -> ModelResult<bool> {
        self.faults.check("is_enabled")?;
        Ok(self.enabled)
    }

    fn is_installed(&self) -> ModelResult<bool> {
        self.faults.check("is_installed")?;
        Ok(self.installed)
    }

    fn hit_count(&self) -> ModelResult<i32> {
        self.faults.check("hit_count")?;
        Ok(self.hit_count)
    }

    fn suspend_policy(&self) -> ModelResult<SuspendPolicy> {
        self.faults.check("suspend_policy")?;
        Ok(self.suspend_policy)
    }

    fn thread_filters(&self) -> ModelResult<Vec<ThreadId>> {
        self.faults.check("thread_filters")?;
        Ok(self.thread_filters.clone())
    }

    fn instance_filters(&self) -> ModelResult<Vec<Arc<dyn JavaValue>>> {
        self.faults.check("instance_filters")?;
        Ok(self
            .instance_filters
            .iter()
            .map(|value| value.clone() as Arc<dyn JavaValue>)
            .collect())
    }

    fn line_number(&self) -> ModelResult<i32> {
        self.faults.check("line_number")?;
        Ok(self.line_number)
    }

    fn source_name(&self) -> ModelResult<Option<String>> {
        self.faults.check("source_name")?;
        Ok(self.source_name.clone())
    }

    fn condition(&self) -> ModelResult<Option<String>> {
        self.faults.check("condition")?;
        Ok(self.condition.clone())
    }

    fn is_condition_enabled(&self) -> ModelResult<bool> {
        self.faults.check("is_condition_enabled")?;
        Ok(self.condition_enabled)
    }

    fn is_run_to_line(&self) -> bool {
        self.run_to_line
    }

    fn method_name(&self) -> ModelResult<Option<String>> {
        self.faults.check("method_name")?;
        Ok(self.method_name.clone())
    }

    fn method_signature(&self) -> ModelResult<Option<String>> {
        self.faults.check("method_signature")?;
        Ok(self.method_signature.clone())
    }

    fn is_entry(&self) -> ModelResult<bool> {
        self.faults.check("is_entry")?;
        Ok(self.entry)
    }

    fn is_exit(&self) -> ModelResult<bool> {
        self.faults.check("is_exit")?;
        Ok(self.exit)
    }

    fn is_entry_suspend(&self, _target: TargetId) -> ModelResult<bool> {
        self.faults.check("is_entry_suspend")?;
        Ok(self.entry_suspend)
    }

    fn field_name(&self) -> ModelResult<String> {
        self.faults.check("field_name")?;
        Ok(self.field_name.clone())
    }

    fn is_access(&self) -> ModelResult<bool> {
        self.faults.check("is_access")?;
        Ok(self.access)
    }

    fn is_modification(&self) -> ModelResult<bool> {
        self.faults.check("is_modification")?;
        Ok(self.modification)
    }

    fn is_access_suspend(&self, _target: TargetId) -> ModelResult<bool> {
        self.faults.check("is_access_suspend")?;
        Ok(self.access_suspend)
    }

    fn is_caught(&self) -> ModelResult<bool> {
        self.faults.check("is_caught")?;
        Ok(self.caught)
    }

    fn is_uncaught(&self) -> ModelResult<bool> {
        self.faults.check("is_uncaught")?;
        Ok(self.uncaught)
    }

    fn is_checked(&self) -> ModelResult<bool> {
        self.faults.check("is_checked")?;
        Ok(self.checked)
    }

    fn exception_type_name(&self) -> ModelResult<Option<String>> {
        self.faults.check("exception_type_name")?;
        Ok(self.exception_type_name.clone())
    }

    fn inclusion_filters(&self) -> ModelResult<Vec<String>> {
        self.faults.check("inclusion_filters")?;
        Ok(self.inclusion_filters.clone())
    }

    fn exclusion_filters(&self) -> ModelResult<Vec<String>> {
        self.faults.check("exclusion_filters")?;
        Ok(self.exclusion_filters.clone())
    }

    fn member_type(&self) -> ModelResult<ClassPrepareMemberType> {
        self.faults.check("member_type")?;
        Ok(self.member_type)
    }
}

#[derive(Clone)]
pub struct MockExpression {
    pub text: String,
    pub value: Option<Arc<MockValue>>,
    pub inspect: bool,
    pub enabled: bool,
}

impl MockExpression {
    pub fn new(text: impl Into<String>, value: Option<MockValue>) -> Self {
        Self {
            text: text.into(),
            value: value.map(Arc::new),
            inspect: false,
            enabled: true,
        }
    }
}

impl JavaExpression for MockExpression {
    fn expression_text(&self) -> String {
        self.text.clone()
    }

    fn value(&self) -> Option<Arc<dyn JavaValue>> {
        self.value
            .clone()
            .map(|value| value as Arc<dyn JavaValue>)
    }

    fn is_inspect(&self) -> bool {
        self.inspect
    }
}

impl JavaWatchExpression for MockExpression {
    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
