#![forbid(unsafe_code)]

//! Transition data model.
//!
//! A [`TransitionVariant`] is pure data: named states, each holding the
//! visual properties to reach and the timing to reach them with. Nothing in
//! here runs an animation; hosts either hand the data to a platform
//! animation engine or sample it with [`TransitionVariant::sample`].

use smallvec::SmallVec;

use crate::easing::Easing;

/// Keyframe storage. The longest built-in sequence has six stops.
pub type Keyframes = SmallVec<[f32; 6]>;

/// A property target: one value, or a keyframe sequence played across the
/// transition's duration.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Static(f32),
    Keyframes(Keyframes),
}

impl PropValue {
    /// Build a keyframe sequence. An empty slice yields `Static(0.0)`.
    #[must_use]
    pub fn keyframes(values: &[f32]) -> Self {
        match values {
            [] => Self::Static(0.0),
            [single] => Self::Static(*single),
            many => Self::Keyframes(SmallVec::from_slice(many)),
        }
    }

    /// Value shown when the property is not animating: the first keyframe.
    #[must_use]
    pub fn resting(&self) -> f32 {
        match self {
            Self::Static(v) => *v,
            Self::Keyframes(frames) => frames.first().copied().unwrap_or(0.0),
        }
    }

    /// Value at the end of one play-through.
    #[must_use]
    pub fn final_value(&self) -> f32 {
        match self {
            Self::Static(v) => *v,
            Self::Keyframes(frames) => frames.last().copied().unwrap_or(0.0),
        }
    }

    #[must_use]
    pub fn is_keyframes(&self) -> bool {
        matches!(self, Self::Keyframes(_))
    }

    /// Value at eased progress `p`: keyframes are spaced evenly.
    fn at(&self, from: f32, p: f32) -> f32 {
        match self {
            Self::Static(to) => from + (to - from) * p,
            Self::Keyframes(frames) => match frames.len() {
                0 => from,
                1 => frames[0],
                n => {
                    let pos = p.clamp(0.0, 1.0) * (n - 1) as f32;
                    let i = (pos.floor() as usize).min(n - 2);
                    let local = pos - i as f32;
                    frames[i] + (frames[i + 1] - frames[i]) * local
                }
            },
        }
    }
}

impl From<f32> for PropValue {
    fn from(v: f32) -> Self {
        Self::Static(v)
    }
}

/// Property deltas for one state. `None` leaves the property untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisualProps {
    pub opacity: Option<PropValue>,
    /// Horizontal offset in px.
    pub x: Option<PropValue>,
    /// Vertical offset in px.
    pub y: Option<PropValue>,
    pub scale: Option<PropValue>,
    /// Rotation in degrees.
    pub rotate: Option<PropValue>,
}

impl VisualProps {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn opacity(mut self, v: impl Into<PropValue>) -> Self {
        self.opacity = Some(v.into());
        self
    }

    #[must_use]
    pub fn x(mut self, v: impl Into<PropValue>) -> Self {
        self.x = Some(v.into());
        self
    }

    #[must_use]
    pub fn y(mut self, v: impl Into<PropValue>) -> Self {
        self.y = Some(v.into());
        self
    }

    #[must_use]
    pub fn scale(mut self, v: impl Into<PropValue>) -> Self {
        self.scale = Some(v.into());
        self
    }

    #[must_use]
    pub fn rotate(mut self, v: impl Into<PropValue>) -> Self {
        self.rotate = Some(v.into());
        self
    }

    /// Visit every present property mutably.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut PropValue)) {
        for value in [
            &mut self.opacity,
            &mut self.x,
            &mut self.y,
            &mut self.scale,
            &mut self.rotate,
        ]
        .into_iter()
        .flatten()
        {
            f(value);
        }
    }

    /// Whether any property is a keyframe sequence.
    #[must_use]
    pub fn has_keyframes(&self) -> bool {
        [&self.opacity, &self.x, &self.y, &self.scale, &self.rotate]
            .into_iter()
            .flatten()
            .any(PropValue::is_keyframes)
    }

    /// Concrete values at rest, filling untouched properties with identity.
    #[must_use]
    pub fn resting(&self) -> ResolvedProps {
        let pick = |p: &Option<PropValue>, identity: f32| {
            p.as_ref().map_or(identity, PropValue::resting)
        };
        ResolvedProps {
            opacity: pick(&self.opacity, 1.0),
            x: pick(&self.x, 0.0),
            y: pick(&self.y, 0.0),
            scale: pick(&self.scale, 1.0),
            rotate: pick(&self.rotate, 0.0),
        }
    }
}

/// Concrete property values for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedProps {
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub rotate: f32,
}

impl Default for ResolvedProps {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ResolvedProps {
    /// Fully opaque, untransformed.
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        rotate: 0.0,
    };

    /// CSS `transform` value.
    #[must_use]
    pub fn to_css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({}) rotate({}deg)",
            self.x, self.y, self.scale, self.rotate
        )
    }
}

/// Repetition of a state's animation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Repeat {
    /// Play once.
    #[default]
    Once,
    /// Loop forever, pausing `delay` seconds between play-throughs.
    Loop { delay: f32 },
}

/// Child orchestration for container variants, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stagger {
    /// Added per child index.
    pub stagger_children: f32,
    /// Before the first child.
    pub delay_children: f32,
}

impl Stagger {
    #[must_use]
    pub const fn new(stagger_children: f32, delay_children: f32) -> Self {
        Self {
            stagger_children,
            delay_children,
        }
    }

    /// Start delay of child `index`.
    #[must_use]
    pub fn child_delay(&self, index: usize) -> f32 {
        self.delay_children + index as f32 * self.stagger_children
    }
}

/// How a state is reached. Times are seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Timing {
    pub duration: f32,
    pub delay: f32,
    pub easing: Easing,
    pub repeat: Repeat,
    pub stagger: Option<Stagger>,
}

impl Timing {
    #[must_use]
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn looping(mut self, repeat_delay: f32) -> Self {
        self.repeat = Repeat::Loop {
            delay: repeat_delay,
        };
        self
    }

    #[must_use]
    pub fn stagger(mut self, stagger: Stagger) -> Self {
        self.stagger = Some(stagger);
        self
    }

    #[must_use]
    pub fn is_looping(&self) -> bool {
        matches!(self.repeat, Repeat::Loop { .. })
    }
}

/// Named state within a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateName {
    Initial,
    Animate,
    Exit,
    Hover,
}

/// Properties plus optional timing for one named state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VariantState {
    pub props: VisualProps,
    pub timing: Option<Timing>,
}

impl VariantState {
    #[must_use]
    pub fn new(props: VisualProps) -> Self {
        Self {
            props,
            timing: None,
        }
    }

    #[must_use]
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = Some(timing);
        self
    }
}

/// A complete enter/exit/hover descriptor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransitionVariant {
    pub initial: VariantState,
    pub animate: VariantState,
    pub exit: Option<VariantState>,
    pub hover: Option<VariantState>,
}

impl TransitionVariant {
    #[must_use]
    pub fn new(initial: VariantState, animate: VariantState) -> Self {
        Self {
            initial,
            animate,
            exit: None,
            hover: None,
        }
    }

    #[must_use]
    pub fn with_exit(mut self, exit: VariantState) -> Self {
        self.exit = Some(exit);
        self
    }

    #[must_use]
    pub fn with_hover(mut self, hover: VariantState) -> Self {
        self.hover = Some(hover);
        self
    }

    /// Look up a state. `Initial` and `Animate` always exist.
    #[must_use]
    pub fn state(&self, name: StateName) -> Option<&VariantState> {
        match name {
            StateName::Initial => Some(&self.initial),
            StateName::Animate => Some(&self.animate),
            StateName::Exit => self.exit.as_ref(),
            StateName::Hover => self.hover.as_ref(),
        }
    }

    /// Every present state, for transforms that must touch all of them.
    pub fn states_mut(&mut self) -> impl Iterator<Item = &mut VariantState> {
        [Some(&mut self.initial), Some(&mut self.animate)]
            .into_iter()
            .chain([self.exit.as_mut(), self.hover.as_mut()])
            .flatten()
    }

    /// Every present state.
    pub fn states(&self) -> impl Iterator<Item = &VariantState> {
        [Some(&self.initial), Some(&self.animate)]
            .into_iter()
            .chain([self.exit.as_ref(), self.hover.as_ref()])
            .flatten()
    }

    /// Interpolate from the resting `Initial` values toward `state` at
    /// linear progress `t` (eased by the state's curve).
    ///
    /// A state without timing is reached instantly. Missing states sample
    /// as the resting `Initial` values.
    #[must_use]
    pub fn sample(&self, state: StateName, t: f32) -> ResolvedProps {
        let from = self.initial.props.resting();
        let Some(target) = self.state(state) else {
            return from;
        };
        let p = match target.timing {
            Some(timing) if timing.duration > 0.0 => timing.easing.apply(t),
            _ => 1.0,
        };
        let lerp =
            |prop: &Option<PropValue>, from: f32| prop.as_ref().map_or(from, |v| v.at(from, p));
        ResolvedProps {
            opacity: lerp(&target.props.opacity, from.opacity),
            x: lerp(&target.props.x, from.x),
            y: lerp(&target.props.y, from.y),
            scale: lerp(&target.props.scale, from.scale),
            rotate: lerp(&target.props.rotate, from.rotate),
        }
    }
}
