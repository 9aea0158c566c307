// Generation count: 1
// @generated by cargo-strgen. Do not edit.
#[automatically_derived]
impl ::core::fmt::Display for Person {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        ::core::write!(
            f, "FirstName:{}; LastName:{}; Age:{}", self.FirstName, self.LastName, self.Age
        )
    }
}
