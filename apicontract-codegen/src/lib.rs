use proc_macro::TokenStream;
use quote::quote;
use quote::quote_spanned;
use syn::spanned::Spanned;

/// Turn a function taking a `RequestConfig` into a test that receives the
/// configuration built by the given function.
///
/// ```ignore
/// fn default_request_config() -> Result<RequestConfig, apicontract::Error> {
///     RequestConfig::build("https://swapi.dev/api/", "application/json")
/// }
///
/// #[contract_test(default_request_config)]
/// fn get_film_by_id(config: RequestConfig) -> Result<(), apicontract::Error> {
///     ApiClient::new().get("/films/1/", &config)?.then().status_code(200)?;
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn contract_test(attrs: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as syn::ItemFn);
    let args = syn::parse_macro_input!(attrs as syn::AttributeArgs);

    let attributes = &input.attrs;
    let visibility = &input.vis;
    let signature = &input.sig;
    let name = &signature.ident;
    let inputs = &signature.inputs;
    let output = &signature.output;
    let block = &input.block;

    if args.len() != 1 {
        return quote! {
            compile_error!("A request configuration function should be passed to the macro");
        }
        .into();
    }

    let configuration_function;
    if let syn::NestedMeta::Meta(syn::Meta::Path(function_path)) = &args[0] {
        configuration_function = function_path;
    } else {
        let error = quote! {
            compile_error!("The argument should be a configuration function!");
        };

        return error.into();
    }

    if let Some(asyncness) = &signature.asyncness {
        return quote_spanned! {asyncness.span()=>
            compile_error!("Contract tests can't be async!");
        }
        .into();
    }

    if inputs.len() != 1 || !signature.generics.params.is_empty() {
        return quote_spanned! {signature.span()=>
            compile_error!("A contract test should take exactly one RequestConfig argument!");
        }
        .into();
    }

    let expanded = quote! {
        #[test]
        #(#attributes)*
        #visibility fn #name() #output {
            fn __contract_test_body(#inputs) #output #block

            apicontract::init_test_logging();
            let __contract_test_configuration = match #configuration_function() {
                Ok(configuration) => configuration,
                Err(e) => panic!("Failed to build the request configuration: {}", e),
            };

            __contract_test_body(__contract_test_configuration)
        }
    };

    TokenStream::from(expanded)
}
