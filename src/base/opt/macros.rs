//! Macros for option types.
//!
//! These macros are only used to generate enums in the parent module.
//! They are here in a separate module to keep the parent tidy.

macro_rules! opt_types {
    ( $(
        $module:ident::{ $( $opt:ident => $code:ident ),* };
    )* ) => {

        $( $( pub use self::$module::$opt; )* )*

        $( pub mod $module; )*

        //------------ AllOptData --------------------------------------------

        /// Option data for all implemented option types.
        ///
        /// Options with any other option code are kept as
        /// [`UnknownOptData`].
        #[derive(Clone, Debug, Eq, Hash, PartialEq)]
        pub enum AllOptData {
            $( $(
                $opt($module::$opt),
            )* )*
            Other(UnknownOptData),
        }

        //--- From

        $( $(
            impl From<$opt> for AllOptData {
                fn from(value: $module::$opt) -> Self {
                    AllOptData::$opt(value)
                }
            }
        )* )*

        impl From<UnknownOptData> for AllOptData {
            fn from(value: UnknownOptData) -> Self {
                AllOptData::Other(value)
            }
        }

        //--- OptData, ParseOptData, and ComposeOptData

        impl OptData for AllOptData {
            fn code(&self) -> OptionCode {
                match *self {
                    $( $(
                        AllOptData::$opt(_) => OptionCode::$code,
                    )* )*
                    AllOptData::Other(ref inner) => inner.code(),
                }
            }
        }

        impl ParseOptData for AllOptData {
            fn parse_option(
                code: OptionCode,
                parser: &mut WireParser,
            ) -> Result<Option<Self>, ParseError> {
                match code {
                    $( $(
                        OptionCode::$code => {
                            Ok(Some(AllOptData::$opt(
                                $opt::parse(parser)?
                            )))
                        }
                    )* )*
                    _ => {
                        Ok(UnknownOptData::parse_option(
                            code, parser
                        )?.map(AllOptData::Other))
                    }
                }
            }
        }

        impl ComposeOptData for AllOptData {
            fn compose_len(&self) -> u16 {
                match *self {
                    $( $(
                        AllOptData::$opt(ref inner) => inner.compose_len(),
                    )* )*
                    AllOptData::Other(ref inner) => inner.compose_len(),
                }
            }

            fn compose_option<Target: OctetsBuilder + ?Sized>(
                &self, target: &mut Target
            ) -> Result<(), Target::AppendError> {
                match *self {
                    $( $(
                        AllOptData::$opt(ref inner) => {
                            inner.compose_option(target)
                        }
                    )* )*
                    AllOptData::Other(ref inner) => {
                        inner.compose_option(target)
                    }
                }
            }
        }

        //--- Display

        impl fmt::Display for AllOptData {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                match *self {
                    $( $(
                        AllOptData::$opt(ref inner) => {
                            write!(f, "{} {}", OptionCode::$code, inner)
                        }
                    )* )*
                    AllOptData::Other(ref inner) => {
                        fmt::Display::fmt(inner, f)
                    }
                }
            }
        }
    }
}
