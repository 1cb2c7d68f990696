use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenTree};
use proc_macro_crate::{crate_name, FoundCrate};
use quote::quote;
use rodata_assets::{
    encode_font, encode_sprites, load_image, FontDescriptor, FontOptions, Glyph, SpriteManifest,
    SpriteOptions,
};
use std::{
    fmt::Display,
    path::{Path, PathBuf},
    str::FromStr,
};
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
    LitStr, Result, Token,
};

/// `key = value` after the file name.
struct Setting {
    key: Ident,
    value: TokenTree,
}

impl Setting {
    fn value<T>(&self) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.value
            .to_string()
            .parse()
            .map_err(|err| syn::Error::new(self.value.span(), err))
    }

    fn unknown(&self, expected: &str) -> syn::Error {
        syn::Error::new(
            self.key.span(),
            format!("unknown setting `{}`, expected {expected}", self.key),
        )
    }
}

impl Parse for Setting {
    fn parse(input: ParseStream) -> Result<Self> {
        let key = input.parse()?;
        input.parse::<Token![=]>()?;
        let value = input.parse()?;

        Ok(Self { key, value })
    }
}

struct Settings {
    settings: Punctuated<Setting, Token![,]>,
}

impl Parse for Settings {
    fn parse(input: ParseStream) -> Result<Self> {
        let settings = if input.lookahead1().peek(Token![,]) {
            input.parse::<Token![,]>()?;
            Punctuated::parse_terminated(input)?
        } else {
            Punctuated::new()
        };

        Ok(Self { settings })
    }
}

struct IncludeFont {
    filename: LitStr,
    options: FontOptions,
}

impl Parse for IncludeFont {
    fn parse(input: ParseStream) -> Result<Self> {
        let filename = input.parse()?;
        let mut options = FontOptions::default();

        for setting in input.parse::<Settings>()?.settings {
            match setting.key.to_string().as_str() {
                "sampling" => options.sampling = setting.value()?,
                "tail" => options.tail = setting.value()?,
                "threshold" => options.alpha_threshold = setting.value()?,
                _ => return Err(setting.unknown("`sampling`, `tail` or `threshold`")),
            }
        }

        Ok(Self { filename, options })
    }
}

struct IncludeSprites {
    filename: LitStr,
    options: SpriteOptions,
}

impl Parse for IncludeSprites {
    fn parse(input: ParseStream) -> Result<Self> {
        let filename = input.parse()?;
        let mut options = SpriteOptions::default();

        for setting in input.parse::<Settings>()?.settings {
            match setting.key.to_string().as_str() {
                "odd_width" => options.odd_width = setting.value()?,
                _ => return Err(setting.unknown("`odd_width`")),
            }
        }

        Ok(Self { filename, options })
    }
}

/// Path to the `rodata-tables` crate as seen from the invoking crate.
fn runtime_crate() -> proc_macro2::TokenStream {
    match crate_name("rodata-tables") {
        Ok(FoundCrate::Itself) => quote!(crate),
        Ok(FoundCrate::Name(name)) => {
            let name = Ident::new(&name, Span::call_site());
            quote!(::#name)
        }
        Err(_) => quote!(::rodata_tables),
    }
}

fn resolve(filename: &LitStr) -> Result<PathBuf> {
    let dir = std::env::var_os("CARGO_MANIFEST_DIR")
        .ok_or_else(|| syn::Error::new(filename.span(), "CARGO_MANIFEST_DIR is not set"))?;

    Ok(PathBuf::from(dir).join(filename.value()))
}

/// `include_bytes!` of every input, so edits to them trigger a rebuild.
fn track(paths: &[&Path]) -> proc_macro2::TokenStream {
    let paths = paths.iter().map(|path| path.to_string_lossy().into_owned());
    quote! {
        #( const _: &[u8] = include_bytes!(#paths); )*
    }
}

fn conversion_error(filename: &LitStr, err: impl Display) -> syn::Error {
    syn::Error::new(filename.span(), format!("{}: {err}", filename.value()))
}

fn glyph_literal(krate: &proc_macro2::TokenStream, glyph: &Glyph) -> proc_macro2::TokenStream {
    let Glyph {
        width,
        height,
        offset,
    } = glyph;

    quote! {
        #krate::Glyph {
            width: #width,
            height: #height,
            offset: #offset,
        }
    }
}

fn expand_font(input: &IncludeFont) -> Result<proc_macro2::TokenStream> {
    let path = resolve(&input.filename)?;
    let descriptor =
        FontDescriptor::load(&path).map_err(|err| conversion_error(&input.filename, err))?;
    let table = load_image(&descriptor.image)
        .and_then(|sheet| encode_font(&descriptor, &sheet, &input.options))
        .map_err(|err| conversion_error(&input.filename, err))?;

    let krate = runtime_crate();
    let tracked = track(&[&path, &descriptor.image]);
    let data = &table.data;
    let first_glyph = table.first_glyph.unwrap_or(0);
    let glyphs = table.glyphs.iter().map(|glyph| glyph_literal(&krate, glyph));

    Ok(quote! {
        {
            #tracked
            #krate::FontTables {
                data: &[ #( #data ),* ],
                first_glyph: #first_glyph,
                glyphs: &[ #( #glyphs ),* ],
            }
        }
    })
}

fn expand_sprites(input: &IncludeSprites) -> Result<proc_macro2::TokenStream> {
    let path = resolve(&input.filename)?;
    let manifest =
        SpriteManifest::load(&path).map_err(|err| conversion_error(&input.filename, err))?;
    let table = encode_sprites(&manifest, &input.options)
        .map_err(|err| conversion_error(&input.filename, err))?;

    let krate = runtime_crate();
    let mut inputs = vec![path.as_path()];
    inputs.extend(manifest.sprites.iter().map(|sprite| sprite.path.as_path()));
    let tracked = track(&inputs);

    let data = &table.data;
    let sprites = table.sprites.iter().map(|sprite| {
        let (width, height, offset) = (sprite.width, sprite.height, sprite.offset);
        quote! {
            #krate::Sprite {
                width: #width,
                height: #height,
                offset: #offset,
            }
        }
    });

    Ok(quote! {
        {
            #tracked
            #krate::SpriteTables {
                data: &[ #( #data ),* ],
                sprites: &[ #( #sprites ),* ],
            }
        }
    })
}

/// Encodes a `.sfl` font descriptor and its sheet at compile time into a
/// `rodata_tables::FontTables`.
///
/// ```ignore
/// const FONT: FontTables = include_font!("assets/font.sfl", sampling = glyph_rect, tail = msb);
/// ```
///
/// The path is relative to the invoking crate's manifest directory. Settings:
/// `sampling = image_origin | glyph_rect`, `tail = msb | lsb` and
/// `threshold = <alpha>`.
#[proc_macro]
pub fn include_font(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as IncludeFont);

    expand_font(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Encodes every image of a sprite manifest at compile time into a
/// `rodata_tables::SpriteTables`.
///
/// ```ignore
/// const SPRITES: SpriteTables = include_sprites!("assets/sprites.list", odd_width = centered);
/// ```
#[proc_macro]
pub fn include_sprites(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as IncludeSprites);

    expand_sprites(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
