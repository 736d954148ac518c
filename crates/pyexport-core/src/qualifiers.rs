//! Reference and cv-qualification analysis of parameter types.
//!
//! The analysis is textual: a type "is const" when the word `const` appears
//! anywhere in it and "is a reference" when it contains `&`. This is
//! enough to decide how a generated wrapper forwards its arguments.

use bitflags::bitflags;

bitflags! {
    /// Decorations found in a parameter's type text.
    ///
    /// ```rust
    /// use pyexport_core::TypeQualifiers;
    ///
    /// let q = TypeQualifiers::of("const std::string&");
    /// assert_eq!(q, TypeQualifiers::CONST | TypeQualifiers::LVALUE_REF);
    ///
    /// let q = TypeQualifiers::of("std::vector<int>&&");
    /// assert_eq!(q, TypeQualifiers::RVALUE_REF);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeQualifiers: u8 {
        /// The word `const` appears in the type.
        const CONST = 0b001;
        /// The type contains a single `&`.
        const LVALUE_REF = 0b010;
        /// The type contains `&&`.
        const RVALUE_REF = 0b100;
    }
}

impl TypeQualifiers {
    /// Scans a type's text for qualifiers.
    pub fn of(ty: &str) -> Self {
        let mut qualifiers = TypeQualifiers::empty();

        if ty
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .any(|word| word == "const")
        {
            qualifiers |= TypeQualifiers::CONST;
        }
        if ty.contains("&&") {
            qualifiers |= TypeQualifiers::RVALUE_REF;
        } else if ty.contains('&') {
            qualifiers |= TypeQualifiers::LVALUE_REF;
        }

        qualifiers
    }

    /// The forwarding category implied by these qualifiers.
    pub fn category(self) -> ForwardingCategory {
        let is_const = self.contains(TypeQualifiers::CONST);

        if self.contains(TypeQualifiers::RVALUE_REF) {
            if is_const {
                ForwardingCategory::ConstRvalueRef
            } else {
                ForwardingCategory::RvalueRef
            }
        } else if self.contains(TypeQualifiers::LVALUE_REF) {
            if is_const {
                ForwardingCategory::ConstLvalueRef
            } else {
                ForwardingCategory::LvalueRef
            }
        } else {
            ForwardingCategory::Value
        }
    }
}

/// How a parameter is bound, which decides how a wrapper passes it on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForwardingCategory {
    /// Passed by value (pointers included).
    Value,
    /// `T&`
    LvalueRef,
    /// `const T&`
    ConstLvalueRef,
    /// `T&&`
    RvalueRef,
    /// `const T&&`
    ConstRvalueRef,
}

impl ForwardingCategory {
    /// Classifies a parameter type.
    pub fn of(ty: &str) -> Self {
        TypeQualifiers::of(ty).category()
    }

    /// Whether the argument is forwarded as a named lvalue.
    ///
    /// Only a non-const lvalue reference cannot bind to an rvalue, so it is the
    /// one category passed by name. Every other category accepts `std::move`.
    pub fn forwards_by_name(self) -> bool {
        matches!(self, ForwardingCategory::LvalueRef)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        assert_eq!(ForwardingCategory::of("int"), ForwardingCategory::Value);
        assert_eq!(ForwardingCategory::of("const int*"), ForwardingCategory::Value);
        assert_eq!(
            ForwardingCategory::of("std::string&"),
            ForwardingCategory::LvalueRef
        );
        assert_eq!(
            ForwardingCategory::of("const std::string&"),
            ForwardingCategory::ConstLvalueRef
        );
        assert_eq!(
            ForwardingCategory::of("std::string&&"),
            ForwardingCategory::RvalueRef
        );
        assert_eq!(
            ForwardingCategory::of("const std::string&&"),
            ForwardingCategory::ConstRvalueRef
        );
    }

    #[test]
    fn only_mutable_lvalue_refs_forward_by_name() {
        assert!(ForwardingCategory::LvalueRef.forwards_by_name());
        assert!(!ForwardingCategory::Value.forwards_by_name());
        assert!(!ForwardingCategory::ConstLvalueRef.forwards_by_name());
        assert!(!ForwardingCategory::RvalueRef.forwards_by_name());
        assert!(!ForwardingCategory::ConstRvalueRef.forwards_by_name());
    }

    #[test]
    fn reference_to_pointer_is_an_lvalue_ref() {
        let q = TypeQualifiers::of("int*&");
        assert_eq!(q, TypeQualifiers::LVALUE_REF);
        assert_eq!(q.category(), ForwardingCategory::LvalueRef);
    }

    #[test]
    fn const_is_matched_as_a_word() {
        assert_eq!(TypeQualifiers::of("constraint_t&"), TypeQualifiers::LVALUE_REF);
        assert_eq!(
            TypeQualifiers::of("std::vector<const int>&"),
            TypeQualifiers::CONST | TypeQualifiers::LVALUE_REF
        );
        assert_eq!(TypeQualifiers::of("int* const"), TypeQualifiers::CONST);
    }
}
