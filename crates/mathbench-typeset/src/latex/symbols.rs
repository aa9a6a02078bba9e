// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command tables.

pub(crate) fn greek(name: &str) -> Option<&'static str> {
    Some(match name {
        "alpha" => "α",
        "beta" => "β",
        "gamma" => "γ",
        "delta" => "δ",
        "epsilon" => "ϵ",
        "varepsilon" => "ε",
        "zeta" => "ζ",
        "eta" => "η",
        "theta" => "θ",
        "vartheta" => "ϑ",
        "iota" => "ι",
        "kappa" => "κ",
        "lambda" => "λ",
        "mu" => "μ",
        "nu" => "ν",
        "xi" => "ξ",
        "pi" => "π",
        "varpi" => "ϖ",
        "rho" => "ρ",
        "varrho" => "ϱ",
        "sigma" => "σ",
        "varsigma" => "ς",
        "tau" => "τ",
        "upsilon" => "υ",
        "phi" => "ϕ",
        "varphi" => "φ",
        "chi" => "χ",
        "psi" => "ψ",
        "omega" => "ω",
        "Gamma" => "Γ",
        "Delta" => "Δ",
        "Theta" => "Θ",
        "Lambda" => "Λ",
        "Xi" => "Ξ",
        "Pi" => "Π",
        "Sigma" => "Σ",
        "Upsilon" => "Υ",
        "Phi" => "Φ",
        "Psi" => "Ψ",
        "Omega" => "Ω",
        _ => return None,
    })
}

/// Letter-like symbols rendered as identifiers.
pub(crate) fn letterlike(name: &str) -> Option<&'static str> {
    Some(match name {
        "infty" => "∞",
        "partial" => "∂",
        "nabla" => "∇",
        "emptyset" | "varnothing" => "∅",
        "ell" => "ℓ",
        "hbar" => "ℏ",
        "Re" => "ℜ",
        "Im" => "ℑ",
        "aleph" => "ℵ",
        _ => return None,
    })
}

/// Binary operators, relations, arrows and punctuation.
pub(crate) fn operator(name: &str) -> Option<&'static str> {
    Some(match name {
        "pm" => "±",
        "mp" => "∓",
        "times" => "×",
        "cdot" => "⋅",
        "div" => "÷",
        "ast" => "∗",
        "star" => "⋆",
        "circ" => "∘",
        "bullet" => "∙",
        "oplus" => "⊕",
        "otimes" => "⊗",
        "cup" => "∪",
        "cap" => "∩",
        "setminus" => "∖",
        "wedge" | "land" => "∧",
        "vee" | "lor" => "∨",
        "neg" | "lnot" => "¬",
        "leq" | "le" => "≤",
        "geq" | "ge" => "≥",
        "neq" | "ne" => "≠",
        "ll" => "≪",
        "gg" => "≫",
        "approx" => "≈",
        "equiv" => "≡",
        "sim" => "∼",
        "simeq" => "≃",
        "cong" => "≅",
        "propto" => "∝",
        "in" => "∈",
        "notin" => "∉",
        "ni" => "∋",
        "subset" => "⊂",
        "supset" => "⊃",
        "subseteq" => "⊆",
        "supseteq" => "⊇",
        "perp" => "⊥",
        "parallel" => "∥",
        "mid" => "∣",
        "forall" => "∀",
        "exists" => "∃",
        "to" | "rightarrow" => "→",
        "leftarrow" | "gets" => "←",
        "leftrightarrow" => "↔",
        "Rightarrow" | "implies" => "⇒",
        "Leftarrow" => "⇐",
        "Leftrightarrow" | "iff" => "⇔",
        "mapsto" => "↦",
        "uparrow" => "↑",
        "downarrow" => "↓",
        "ldots" | "dots" => "…",
        "cdots" => "⋯",
        "vdots" => "⋮",
        "ddots" => "⋱",
        "prime" => "′",
        "angle" => "∠",
        "triangle" => "△",
        "langle" => "⟨",
        "rangle" => "⟩",
        "lfloor" => "⌊",
        "rfloor" => "⌋",
        "lceil" => "⌈",
        "rceil" => "⌉",
        "vert" | "lvert" | "rvert" => "|",
        "Vert" | "lVert" | "rVert" | "|" => "‖",
        "{" | "lbrace" => "{",
        "}" | "rbrace" => "}",
        _ => return None,
    })
}

/// Large operators and whether their scripts go above/below in display style.
pub(crate) fn large_operator(name: &str) -> Option<(&'static str, bool)> {
    Some(match name {
        "sum" => ("∑", true),
        "prod" => ("∏", true),
        "coprod" => ("∐", true),
        "bigcup" => ("⋃", true),
        "bigcap" => ("⋂", true),
        "bigoplus" => ("⨁", true),
        "bigotimes" => ("⨂", true),
        "int" => ("∫", false),
        "iint" => ("∬", false),
        "iiint" => ("∭", false),
        "oint" => ("∮", false),
        "lim" => ("lim", true),
        "limsup" => ("lim sup", true),
        "liminf" => ("lim inf", true),
        "max" => ("max", true),
        "min" => ("min", true),
        "sup" => ("sup", true),
        "inf" => ("inf", true),
        "det" => ("det", true),
        "gcd" => ("gcd", true),
        _ => return None,
    })
}

/// Upright multi-letter function names.
pub(crate) fn function_name(name: &str) -> Option<&'static str> {
    const NAMES: [&str; 25] = [
        "sin", "cos", "tan", "sec", "csc", "cot", "arcsin", "arccos", "arctan", "sinh", "cosh",
        "tanh", "coth", "log", "ln", "lg", "exp", "deg", "dim", "ker", "arg", "hom", "Pr", "sgn",
        "tr",
    ];
    NAMES.iter().copied().find(|n| *n == name)
}

/// Accent mark placed over its argument.
pub(crate) fn accent(name: &str) -> Option<&'static str> {
    Some(match name {
        "vec" => "→",
        "hat" | "widehat" => "^",
        "bar" | "overline" => "¯",
        "tilde" | "widetilde" => "~",
        "dot" => "˙",
        "ddot" => "¨",
        _ => return None,
    })
}

/// Horizontal space commands and their widths.
pub(crate) fn spacing(name: &str) -> Option<&'static str> {
    Some(match name {
        "," | "thinspace" => "0.167em",
        ":" | ">" | "medspace" => "0.222em",
        ";" | "thickspace" => "0.278em",
        "!" | "negthinspace" => "-0.167em",
        " " => "0.25em",
        "quad" => "1em",
        "qquad" => "2em",
        _ => return None,
    })
}

/// Font switches that take one argument, mapped to `mathvariant`.
pub(crate) fn font(name: &str) -> Option<&'static str> {
    Some(match name {
        "mathrm" | "operatorname" => "normal",
        "mathbf" => "bold",
        "mathit" => "italic",
        "boldsymbol" => "bold-italic",
        "mathbb" => "double-struck",
        "mathcal" => "script",
        "mathfrak" => "fraktur",
        "mathsf" => "sans-serif",
        "mathtt" => "monospace",
        _ => return None,
    })
}

/// Characters that print themselves after a backslash.
pub(crate) fn escaped(name: &str) -> Option<&'static str> {
    Some(match name {
        "%" => "%",
        "$" => "$",
        "&" => "&",
        "_" => "_",
        "#" => "#",
        _ => return None,
    })
}

/// Fences of the matrix-like environments.
pub(crate) fn environment_fences(name: &str) -> Option<(&'static str, &'static str)> {
    Some(match name {
        "matrix" | "aligned" | "align" | "align*" | "gathered" | "array" => ("", ""),
        "pmatrix" => ("(", ")"),
        "bmatrix" => ("[", "]"),
        "Bmatrix" => ("{", "}"),
        "vmatrix" => ("|", "|"),
        "Vmatrix" => ("‖", "‖"),
        "cases" => ("{", ""),
        _ => return None,
    })
}
