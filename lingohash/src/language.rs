use std::fmt;
use std::str::FromStr;

use bincode::{Decode, Encode};

use crate::errors::{LingohashError, Result};

macro_rules! languages {
    ( $( $variant:ident => $code:literal, $name:literal; )* ) => {
        /// Language identified by a model.
        ///
        /// Variants are encoded in model files by position, so new languages must be added
        /// at the end.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Decode, Encode)]
        pub enum Language {
            $(
                #[doc = $name]
                $variant,
            )*
        }

        impl Language {
            /// All languages.
            pub const ALL: &'static [Self] = &[ $( Self::$variant, )* ];

            /// Gets the ISO 639-1 code of the language.
            pub const fn code(self) -> &'static str {
                match self {
                    $( Self::$variant => $code, )*
                }
            }

            /// Gets the English name of the language.
            pub const fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )*
                }
            }
        }

        impl FromStr for Language {
            type Err = LingohashError;

            fn from_str(code: &str) -> Result<Self> {
                match code {
                    $( $code => Ok(Self::$variant), )*
                    _ => Err(LingohashError::invalid_argument(
                        "code",
                        format!("unknown language code: {:?}", code),
                    )),
                }
            }
        }
    };
}

languages! {
    Af => "af", "Afrikaans";
    Ar => "ar", "Arabic";
    Az => "az", "Azerbaijani";
    Be => "be", "Belarusian";
    Bg => "bg", "Bulgarian";
    Bn => "bn", "Bengali";
    Bs => "bs", "Bosnian";
    Ca => "ca", "Catalan";
    Cs => "cs", "Czech";
    Cy => "cy", "Welsh";
    Da => "da", "Danish";
    De => "de", "German";
    El => "el", "Greek";
    En => "en", "English";
    Eo => "eo", "Esperanto";
    Es => "es", "Spanish";
    Et => "et", "Estonian";
    Eu => "eu", "Basque";
    Fa => "fa", "Persian";
    Fi => "fi", "Finnish";
    Fr => "fr", "French";
    Ga => "ga", "Irish";
    Gu => "gu", "Gujarati";
    He => "he", "Hebrew";
    Hi => "hi", "Hindi";
    Hr => "hr", "Croatian";
    Hu => "hu", "Hungarian";
    Hy => "hy", "Armenian";
    Id => "id", "Indonesian";
    Is => "is", "Icelandic";
    It => "it", "Italian";
    Ja => "ja", "Japanese";
    Ka => "ka", "Georgian";
    Kk => "kk", "Kazakh";
    Ko => "ko", "Korean";
    La => "la", "Latin";
    Lg => "lg", "Ganda";
    Lt => "lt", "Lithuanian";
    Lv => "lv", "Latvian";
    Mi => "mi", "Maori";
    Mk => "mk", "Macedonian";
    Mn => "mn", "Mongolian";
    Mr => "mr", "Marathi";
    Ms => "ms", "Malay";
    Nb => "nb", "Norwegian Bokmal";
    Nl => "nl", "Dutch";
    Nn => "nn", "Norwegian Nynorsk";
    Pa => "pa", "Punjabi";
    Pl => "pl", "Polish";
    Pt => "pt", "Portuguese";
    Ro => "ro", "Romanian";
    Ru => "ru", "Russian";
    Sk => "sk", "Slovak";
    Sl => "sl", "Slovene";
    Sn => "sn", "Shona";
    So => "so", "Somali";
    Sq => "sq", "Albanian";
    Sr => "sr", "Serbian";
    St => "st", "Sotho";
    Sv => "sv", "Swedish";
    Sw => "sw", "Swahili";
    Ta => "ta", "Tamil";
    Te => "te", "Telugu";
    Th => "th", "Thai";
    Tl => "tl", "Tagalog";
    Tn => "tn", "Tswana";
    Tr => "tr", "Turkish";
    Ts => "ts", "Tsonga";
    Uk => "uk", "Ukrainian";
    Ur => "ur", "Urdu";
    Vi => "vi", "Vietnamese";
    Xh => "xh", "Xhosa";
    Yo => "yo", "Yoruba";
    Zh => "zh", "Chinese";
    Zu => "zu", "Zulu";
}

/// Language returned for texts without any feature, unless a model specifies another one.
pub const DEFAULT_LANGUAGE: Language = Language::En;

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.code())
    }
}
