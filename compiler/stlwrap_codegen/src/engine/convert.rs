//! Free converter functions between native containers and storage.

use stlwrap_ir::{ConversionTriple, Expr, Fragment, Function, Item, Param, Stmt};
use stlwrap_types::{CanonicalType, DescriptorError, Registry};

use super::{ConverterNames, Instantiation, InstantiationEngine};

/// `cdef <ret_ty> name(<param_ty> param)` whose body runs `conversion`.
fn converter(
    ret_ty: &str,
    name: &str,
    param: Param,
    conversion: ConversionTriple,
) -> Function {
    let mut body = conversion.decl;
    body.extend(conversion.body);
    body.push(Stmt::ret(conversion.ret));
    Function::cdef(ret_ty, name, vec![param], body)
}

fn converter_fragments(
    names: &ConverterNames,
    to_storage: Function,
    to_native: Function,
) -> Instantiation {
    let mut interface = Fragment::new();
    interface.push(Item::Comment(names.comment.clone()));
    interface.push(Item::Function(to_storage.declaration()));
    interface.push(Item::Function(to_native.declaration()));

    let mut implementation = Fragment::new();
    implementation.push(Item::Comment(names.comment.clone()));
    implementation.push(Item::Function(to_storage));
    implementation.push(Item::Function(to_native));

    Instantiation {
        implementation,
        interface,
        tests: Fragment::new(),
    }
}

impl InstantiationEngine<'_> {
    /// `py_to_cpp_set_<elem>` and `cpp_to_py_set_<elem>`.
    #[tracing::instrument(level = "debug", skip_all, fields(elem = %elem))]
    pub fn set_converters(&self, elem: &CanonicalType) -> Result<Instantiation, DescriptorError> {
        let elem = Registry::ordered_key(elem.clone())?;
        let names = ConverterNames::for_set(self.registry(), &elem)?;
        let ty = CanonicalType::set(elem);
        let to_storage = converter(
            &names.storage,
            &names.to_storage,
            Param::typed("set", "pyset"),
            self.composer.native_to_storage(&Expr::name("pyset"), &ty)?,
        );
        let to_native = converter(
            "set",
            &names.to_native,
            Param::typed(names.storage.as_str(), "cppset"),
            self.composer.storage_to_native(&Expr::name("cppset"), &ty)?,
        );
        tracing::debug!(func = %names.to_storage, "generated set converters");
        Ok(converter_fragments(&names, to_storage, to_native))
    }

    /// `dict_to_map_<key>_<value>` and `map_to_dict_<key>_<value>`.
    #[tracing::instrument(level = "debug", skip_all, fields(key = %key, value = %value))]
    pub fn map_converters(
        &self,
        key: &CanonicalType,
        value: &CanonicalType,
    ) -> Result<Instantiation, DescriptorError> {
        let key = Registry::ordered_key(key.clone())?;
        let names = ConverterNames::for_map(self.registry(), &key, value)?;
        let ty = CanonicalType::map(key, value.clone());
        let to_storage = converter(
            &names.storage,
            &names.to_storage,
            Param::typed("dict", "pydict"),
            self.composer.native_to_storage(&Expr::name("pydict"), &ty)?,
        );
        let to_native = converter(
            "dict",
            &names.to_native,
            Param::typed(names.storage.as_str(), "cppmap"),
            self.composer.storage_to_native(&Expr::name("cppmap"), &ty)?,
        );
        tracing::debug!(func = %names.to_storage, "generated map converters");
        Ok(converter_fragments(&names, to_storage, to_native))
    }
}
