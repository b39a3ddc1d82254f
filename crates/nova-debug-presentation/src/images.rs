//! Icon descriptors: a base image plus overlay flags.
//!
//! Icons are decorative, so every function here returns `None` instead of a
//! fault when the element cannot be inspected.

use nova_debug_model::{
    BreakpointKind, ClassPrepareMemberType, DebugElement, JavaBreakpoint, JavaDebugTarget,
    JavaExpression, JavaStackFrame, JavaThread, JavaVariable, ModelResult, MonitorRelation,
    Visibility,
};

bitflags::bitflags! {
    /// Overlay flags drawn on top of a [`BaseImage`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AdornmentFlags: u32 {
        const ENABLED = 1 << 0;
        const INSTALLED = 1 << 1;
        const CONDITIONAL = 1 << 2;
        const ENTRY = 1 << 3;
        const EXIT = 1 << 4;
        const CAUGHT = 1 << 5;
        const UNCAUGHT = 1 << 6;
        const SCOPED = 1 << 7;
        const OUT_OF_SYNCH = 1 << 8;
        const MAY_BE_OUT_OF_SYNCH = 1 << 9;
        const SYNCHRONIZED = 1 << 10;
        const IN_DEADLOCK = 1 << 11;
        const OWNS_MONITOR = 1 << 12;
        const IN_CONTENTION_FOR_MONITOR = 1 << 13;
        const FINAL = 1 << 14;
        const STATIC = 1 << 15;
    }
}

impl AdornmentFlags {
    fn when(self, condition: bool) -> Self {
        if condition {
            self
        } else {
            Self::empty()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseImage {
    DebugTarget,
    DebugTargetTerminated,
    ThreadSuspended,
    ThreadRunning,
    ThreadTerminated,
    StackFrame,
    Breakpoint,
    BreakpointDisabled,
    Watchpoint,
    WatchpointDisabled,
    AccessWatchpoint,
    AccessWatchpointDisabled,
    ModificationWatchpoint,
    ModificationWatchpointDisabled,
    Exception,
    ExceptionDisabled,
    /// Unchecked exception breakpoint.
    Error,
    Class,
    Interface,
    LocalVariable,
    Public,
    Protected,
    Private,
    Default,
    InspectExpression,
    Monitor,
    OwnedMonitor,
    ContendedMonitor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageSize {
    #[default]
    Default,
    /// 16x16, used by variables and inspect expressions.
    Big,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageDescriptor {
    pub base: BaseImage,
    pub flags: AdornmentFlags,
    pub size: ImageSize,
}

impl ImageDescriptor {
    pub fn new(base: BaseImage, flags: AdornmentFlags) -> Self {
        Self {
            base,
            flags,
            size: ImageSize::Default,
        }
    }

    pub fn big(mut self) -> Self {
        self.size = ImageSize::Big;
        self
    }
}

/// Icon for any element kind.
pub fn image(element: &DebugElement) -> Option<ImageDescriptor> {
    match element {
        DebugElement::Variable(variable) => Some(variable_image(variable.as_ref())),
        DebugElement::Breakpoint(breakpoint) => breakpoint_image(breakpoint.as_ref()),
        DebugElement::StackFrame(frame) => Some(ImageDescriptor::new(
            BaseImage::StackFrame,
            frame_flags(frame.as_ref()),
        )),
        DebugElement::Thread(thread) => Some(thread_image(thread.as_ref())),
        DebugElement::Target(target) => Some(target_image(target.as_ref())),
        DebugElement::Value(_) => Some(ImageDescriptor::new(
            BaseImage::Public,
            AdornmentFlags::empty(),
        )),
        DebugElement::Expression(expression) => expression_image(expression.as_ref()),
        DebugElement::WatchExpression(expression) => expression_image(expression.as_ref()),
        DebugElement::Monitor(relation) => Some(monitor_image(relation)),
    }
}

pub fn thread_image(thread: &dyn JavaThread) -> ImageDescriptor {
    let base = if thread.is_suspended() && !thread.is_performing_evaluation() {
        BaseImage::ThreadSuspended
    } else if thread.is_terminated() {
        BaseImage::ThreadTerminated
    } else {
        BaseImage::ThreadRunning
    };

    let mut flags = AdornmentFlags::IN_DEADLOCK.when(thread.is_in_deadlock());
    if thread.is_out_of_synch().unwrap_or(false) {
        flags |= AdornmentFlags::OUT_OF_SYNCH;
    } else if thread.may_be_out_of_synch().unwrap_or(false) {
        flags |= AdornmentFlags::MAY_BE_OUT_OF_SYNCH;
    }
    ImageDescriptor::new(base, flags)
}

fn target_image(target: &dyn JavaDebugTarget) -> ImageDescriptor {
    let base = if target.is_terminated() || target.is_disconnected() {
        BaseImage::DebugTargetTerminated
    } else {
        BaseImage::DebugTarget
    };
    let flags = if target.is_out_of_synch().unwrap_or(false) {
        AdornmentFlags::OUT_OF_SYNCH
    } else if target.may_be_out_of_synch().unwrap_or(false) {
        AdornmentFlags::MAY_BE_OUT_OF_SYNCH
    } else {
        AdornmentFlags::empty()
    };
    ImageDescriptor::new(base, flags)
}

fn frame_flags(frame: &dyn JavaStackFrame) -> AdornmentFlags {
    if frame.is_out_of_synch().unwrap_or(false) {
        return AdornmentFlags::OUT_OF_SYNCH;
    }
    let obsolete = frame.is_obsolete().unwrap_or(false);
    if !obsolete && frame.is_synchronized().unwrap_or(false) {
        return AdornmentFlags::SYNCHRONIZED;
    }
    AdornmentFlags::empty()
}

fn variable_image(variable: &dyn JavaVariable) -> ImageDescriptor {
    let base = match variable.visibility() {
        Ok(Visibility::Local) => BaseImage::LocalVariable,
        Ok(Visibility::Public) => BaseImage::Public,
        Ok(Visibility::Protected) => BaseImage::Protected,
        Ok(Visibility::Private) => BaseImage::Private,
        Ok(Visibility::Package) | Err(_) => BaseImage::Default,
    };
    let flags = AdornmentFlags::FINAL.when(variable.is_final().unwrap_or(false))
        | AdornmentFlags::STATIC.when(variable.is_static().unwrap_or(false));
    ImageDescriptor::new(base, flags).big()
}

fn expression_image<E: JavaExpression + ?Sized>(expression: &E) -> Option<ImageDescriptor> {
    expression.is_inspect().then(|| {
        ImageDescriptor::new(BaseImage::InspectExpression, AdornmentFlags::empty()).big()
    })
}

pub fn monitor_image(relation: &MonitorRelation) -> ImageDescriptor {
    let deadlock = AdornmentFlags::IN_DEADLOCK.when(relation.is_in_deadlock());
    match relation {
        MonitorRelation::Owned { .. } => ImageDescriptor::new(BaseImage::OwnedMonitor, deadlock),
        MonitorRelation::Contended { .. } => {
            ImageDescriptor::new(BaseImage::ContendedMonitor, deadlock)
        }
        MonitorRelation::OwningThread { thread, .. } => ImageDescriptor::new(
            monitor_thread_base(thread.as_ref()),
            AdornmentFlags::OWNS_MONITOR | deadlock,
        ),
        MonitorRelation::WaitingThread { thread, .. } => ImageDescriptor::new(
            monitor_thread_base(thread.as_ref()),
            AdornmentFlags::IN_CONTENTION_FOR_MONITOR | deadlock,
        ),
        MonitorRelation::NoMonitorInfo => {
            ImageDescriptor::new(BaseImage::Monitor, AdornmentFlags::empty())
        }
    }
}

fn monitor_thread_base(thread: &dyn JavaThread) -> BaseImage {
    if thread.is_suspended() {
        BaseImage::ThreadSuspended
    } else {
        BaseImage::ThreadRunning
    }
}

/// Icon for a breakpoint; run-to-line breakpoints have none.
pub fn breakpoint_image(breakpoint: &dyn JavaBreakpoint) -> Option<ImageDescriptor> {
    let flags = breakpoint_flags(breakpoint);
    let enabled = flags.contains(AdornmentFlags::ENABLED);
    let base = match breakpoint.kind() {
        BreakpointKind::Exception => {
            if !enabled {
                BaseImage::ExceptionDisabled
            } else if breakpoint.is_checked().ok()? {
                BaseImage::Exception
            } else {
                BaseImage::Error
            }
        }
        BreakpointKind::ClassPrepare => match breakpoint.member_type().ok()? {
            ClassPrepareMemberType::Class => BaseImage::Class,
            ClassPrepareMemberType::Interface => BaseImage::Interface,
        },
        BreakpointKind::Watchpoint => {
            let access = breakpoint.is_access().ok()?;
            let modification = breakpoint.is_modification().ok()?;
            match (access, modification, enabled) {
                (true, true, true) => BaseImage::Watchpoint,
                (true, false, true) => BaseImage::AccessWatchpoint,
                (true, false, false) => BaseImage::AccessWatchpointDisabled,
                (false, true, true) => BaseImage::ModificationWatchpoint,
                (false, true, false) => BaseImage::ModificationWatchpointDisabled,
                _ => BaseImage::WatchpointDisabled,
            }
        }
        kind => {
            if kind.is_line_based() && breakpoint.is_run_to_line() {
                return None;
            }
            if breakpoint.is_enabled().ok()? {
                BaseImage::Breakpoint
            } else {
                BaseImage::BreakpointDisabled
            }
        }
    };
    Some(ImageDescriptor::new(base, flags))
}

/// Overlay flags for a breakpoint. Flags whose accessor fails are left unset.
pub fn breakpoint_flags(breakpoint: &dyn JavaBreakpoint) -> AdornmentFlags {
    let mut flags = AdornmentFlags::empty();
    // Stop collecting at the first failure, keeping what was gathered.
    let _ = collect_breakpoint_flags(breakpoint, &mut flags);
    flags
}

fn collect_breakpoint_flags(
    breakpoint: &dyn JavaBreakpoint,
    flags: &mut AdornmentFlags,
) -> ModelResult<()> {
    flags.insert(AdornmentFlags::ENABLED.when(breakpoint.is_enabled()?));
    flags.insert(AdornmentFlags::INSTALLED.when(breakpoint.is_installed()?));
    match breakpoint.kind() {
        BreakpointKind::Exception => {
            flags.insert(AdornmentFlags::CAUGHT.when(breakpoint.is_caught()?));
            flags.insert(AdornmentFlags::UNCAUGHT.when(breakpoint.is_uncaught()?));
            let scoped = !breakpoint.exclusion_filters()?.is_empty()
                || !breakpoint.inclusion_filters()?.is_empty();
            flags.insert(AdornmentFlags::SCOPED.when(scoped));
        }
        BreakpointKind::Method => {
            flags.insert(AdornmentFlags::CONDITIONAL.when(breakpoint.is_condition_enabled()?));
            flags.insert(AdornmentFlags::ENTRY.when(breakpoint.is_entry()?));
            flags.insert(AdornmentFlags::EXIT.when(breakpoint.is_exit()?));
        }
        BreakpointKind::MethodEntry => {
            flags.insert(AdornmentFlags::CONDITIONAL.when(breakpoint.is_condition_enabled()?));
            flags.insert(AdornmentFlags::ENTRY);
        }
        BreakpointKind::Line
        | BreakpointKind::Watchpoint
        | BreakpointKind::Pattern
        | BreakpointKind::TargetPattern
        | BreakpointKind::StratumLine => {
            flags.insert(AdornmentFlags::CONDITIONAL.when(breakpoint.is_condition_enabled()?));
        }
        BreakpointKind::ClassPrepare => {}
    }
    Ok(())
}
