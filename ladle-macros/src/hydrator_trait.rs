use crate::decode_field::FieldMetadata;
use proc_macro2::TokenStream;
use quote::quote;
use syn::ItemStruct;

pub(crate) fn hydrator_trait(item: &ItemStruct, fields: &[FieldMetadata]) -> TokenStream {
    let name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    let assignments = fields.iter().filter(|f| !f.ignore).map(|f| {
        let ident = &f.ident;
        let ty = &f.ty;
        let column = &f.column;
        if f.optional {
            quote! {
                if let Some(index) = ::ladle::CursorExt::field_index(&*cursor, #column) {
                    self.#ident = ::ladle::CursorExt::get_index::<#ty>(&*cursor, index)?;
                }
            }
        } else {
            quote! {
                self.#ident = ::ladle::CursorExt::get::<#ty>(&*cursor, #column)?;
            }
        }
    });
    quote! {
        impl #impl_generics ::ladle::Hydrator for #name #ty_generics #where_clause {
            fn populate_self<__C: ::ladle::Cursor + ?Sized>(
                &mut self,
                cursor: &mut __C,
                manage_cursor: bool,
            ) -> ::ladle::Result<()> {
                let cursor = ::ladle::CursorGuard::new(cursor, manage_cursor);
                #(#assignments)*
                Ok(())
            }
        }
    }
}
