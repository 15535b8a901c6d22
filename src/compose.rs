use crate::props::Props;

/// Layers component defaults, the active kind and the call-site props into the effective
/// props of a component.
///
/// Precedence is per key: call-site > kind > defaults. Nested values are never merged.
/// Keys only set by defaults or the kind come first, in their declaration order, followed by
/// the call-site keys.
pub fn compose(defaults: Option<&Props>, kind: Option<&Props>, props: &Props) -> Props {
    if defaults.is_none() && kind.is_none() {
        return props.clone();
    }

    let mut out = Props::with_capacity(
        props.len() + defaults.map_or(0, Props::len) + kind.map_or(0, Props::len),
    );

    if let Some(defaults) = defaults {
        for (key, value) in defaults.iter() {
            let overridden =
                props.contains_key(key) || kind.is_some_and(|k| k.contains_key(key));
            if !overridden {
                out.insert(key, value.clone());
            }
        }
    }

    if let Some(kind) = kind {
        for (key, value) in kind.iter() {
            if !props.contains_key(key) {
                out.insert(key, value.clone());
            }
        }
    }

    for (key, value) in props.iter() {
        out.insert(key, value.clone());
    }

    out
}
