// Generation count: 1
// @generated by cargo-strgen. Do not edit.
#[automatically_derived]
impl ::core::fmt::Display for T {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        ::core::write!(f, "B:{}; A:{}", self.B, self.A)
    }
}
