use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, run, stderr, stdout};

const DA_TRANSLATIONS: &str = "\
alreadyPartiallyTranslatedKey[theNotYetTranslatedOne]=nowItIsTranslated
simplekeyinknockoutjstemplate=Simpel nøgle i en Knockout.js-skabelon
stringvalue=the Danish stringvalue
arrayvalue[0]=5
arrayvalue[1]=elementer
arrayvalue[2]=i
arrayvalue[3]=et
arrayvalue[4]=array
objectvalue[key1]=værdi1
objectvalue[key2]=værdi2
objectvaluewithsomemissingkeysinthestructure[foo][bar]=bazbaz
objectvaluewithsomemissingkeysinthestructure[foo][quux]=fuzfuz
withexistingkeys=den opdaterede danske værdi
simplekeyinhtml=Simpel nøgle på dansk
simplekeyinhtmlattribute=Simpel nøgle i HTML-attribut på dansk
keywithplaceholdersinhtml=Nøgle med pladsholdere på dansk";

/// Generate the job files, then fill in the Danish one.
fn translated_project() -> Result<CliTest> {
    let test = CliTest::with_translations()?;
    let output = run(test.make_job_command())?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    test.write_file("babel/da.txt", DA_TRANSLATIONS)?;
    Ok(test)
}

#[test]
fn test_overlay_merges_translations_into_store() -> Result<()> {
    let test = translated_project()?;

    let output = run({
        let mut cmd = test.apply_job_command();
        cmd.args(["--mode", "overlay"]);
        cmd
    })?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        test.read_json("thething.i18n")?,
        json!({
            "stringvalue": { "en": "value", "da": "the Danish stringvalue", "de": "" },
            "arrayvalue": {
                "en": [5, "items", "in", "an", "array"],
                "da": [5, "elementer", "i", "et", "array"],
                "de": ["", "", "", "", ""]
            },
            "objectvalue": {
                "en": { "key1": "value1", "key2": "value2" },
                "da": { "key1": "værdi1", "key2": "værdi2" },
                "de": { "key1": "", "key2": "" }
            },
            "objectvaluewithsomemissingkeysinthestructure": {
                "en": { "foo": { "bar": "baz", "quux": "blah" } },
                "da": { "foo": { "bar": "bazbaz", "quux": "fuzfuz" } },
                "de": { "foo": { "bar": "", "quux": "" } }
            },
            "withexistingkeys": {
                "en": "the English value",
                "da": "den opdaterede danske værdi",
                "de": ""
            },
            "simplekeyinhtml": {
                "en": "Simple key in HTML, English",
                "da": "Simpel nøgle på dansk",
                "de": ""
            },
            "simplekeyinhtmlattribute": {
                "en": "Simple key in HTML attribute, English",
                "da": "Simpel nøgle i HTML-attribut på dansk",
                "de": ""
            },
            "keywithplaceholdersinhtml": {
                "en": "Key with {0} placeholders in HTML, English",
                "da": "Nøgle med pladsholdere på dansk",
                "de": ""
            },
            "simplekeyinknockoutjstemplate": {
                "en": "Simple key in a Knockout.js template",
                "da": "Simpel nøgle i en Knockout.js-skabelon",
                "de": ""
            },
            "alreadyPartiallyTranslatedKey": {
                "en": { "theTranslatedOne": "yep", "theNotYetTranslatedOne": "yup" },
                "da": { "theTranslatedOne": "ja", "theNotYetTranslatedOne": "nowItIsTranslated" },
                "de": { "theTranslatedOne": "Ja", "theNotYetTranslatedOne": "" }
            }
        })
    );

    Ok(())
}

#[test]
fn test_replace_conforms_stored_trees_to_reference() -> Result<()> {
    let test = translated_project()?;

    let output = run(test.apply_job_command())?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let store = test.read_json("thething.i18n")?;
    assert_eq!(
        store["alreadyPartiallyTranslatedKey"],
        json!({
            "en": { "theNotYetTranslatedOne": "yup" },
            "da": { "theNotYetTranslatedOne": "nowItIsTranslated" },
            "de": { "theNotYetTranslatedOne": "" }
        })
    );
    assert_eq!(
        store["withexistingkeys"]["da"],
        json!("den opdaterede danske værdi")
    );

    Ok(())
}

#[test]
fn test_apply_reports_per_locale_counts() -> Result<()> {
    let test = translated_project()?;

    let output = run(test.apply_job_command())?;
    let out = stdout(&output);

    assert!(out.contains("da 7 added, 3 updated, 0 unchanged"), "{}", out);
    assert!(out.contains("Saved"), "{}", out);

    Ok(())
}

#[test]
fn test_applying_twice_changes_nothing() -> Result<()> {
    let test = translated_project()?;

    run(test.apply_job_command())?;
    let first = test.read_file("thething.i18n")?;
    let output = run(test.apply_job_command())?;
    let second = test.read_file("thething.i18n")?;

    assert_eq!(first, second);
    assert!(stdout(&output).contains("No changes"));

    Ok(())
}

#[test]
fn test_malformed_line_fails_only_its_locale() -> Result<()> {
    let test = translated_project()?;
    test.write_file("babel/de.txt", "stringvalue=Wert\nobjectvalue[key1=kaputt\n")?;

    let output = run(test.apply_job_command())?;
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("babel/de.txt:2"), "{}", out);
    assert!(out.contains("objectvalue[key1=kaputt"), "{}", out);

    let store = test.read_json("thething.i18n")?;
    assert_eq!(
        store["stringvalue"],
        json!({ "en": "value", "da": "the Danish stringvalue" })
    );

    Ok(())
}

#[test]
fn test_shape_conflict_fails_locale() -> Result<()> {
    let test = translated_project()?;
    test.write_file(
        "babel/de.txt",
        "objectvalue[key1]=eins\nobjectvalue[key1][deeper]=zwei\n",
    )?;

    let output = run(test.apply_job_command())?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("babel/de.txt:2"));
    let store = test.read_json("thething.i18n")?;
    assert!(store["objectvalue"].get("de").is_none());

    Ok(())
}

#[test]
fn test_unknown_keys_are_skipped_with_warning() -> Result<()> {
    let test = translated_project()?;
    test.write_file("babel/de.txt", "stringvalue=Wert\nremovedkey=weg\n")?;

    let output = run(test.apply_job_command())?;
    let out = stdout(&output);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(out.contains("key \"removedkey\""), "{}", out);
    let store = test.read_json("thething.i18n")?;
    assert_eq!(store["stringvalue"]["de"], json!("Wert"));
    assert!(store.get("removedkey").is_none());

    Ok(())
}

#[test]
fn test_missing_job_file_skips_locale() -> Result<()> {
    let test = translated_project()?;
    std::fs::remove_file(test.root().join("babel/de.txt"))?;

    let output = run(test.apply_job_command())?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("de skipped"));
    let store = test.read_json("thething.i18n")?;
    assert!(store["stringvalue"].get("de").is_none());

    Ok(())
}

#[test]
fn test_prune_removes_keys_missing_from_reference() -> Result<()> {
    let test = translated_project()?;
    let mut store = test.read_json("thething.i18n")?;
    store["obsolete"] = json!({ "en": "Old", "da": "Gammel" });
    test.write_file("thething.i18n", &serde_json::to_string_pretty(&store)?)?;

    run(test.apply_job_command())?;
    assert!(test.read_json("thething.i18n")?.get("obsolete").is_some());

    let output = run({
        let mut cmd = test.apply_job_command();
        cmd.arg("--prune");
        cmd
    })?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Pruned 1 stale key"));
    assert!(test.read_json("thething.i18n")?.get("obsolete").is_none());

    Ok(())
}

#[test]
fn test_numeric_subkeys_round_trip_unedited() -> Result<()> {
    let test = CliTest::with_file(
        "translations.i18n.json",
        r#"{ "plural": { "en": { "0": "none", "1": "one" }, "da": { "0": "ingen", "1": "en" } } }"#,
    )?;
    let locales = ["--locales", "en,da"];

    let output = run({
        let mut cmd = test.make_job_command();
        cmd.args(locales);
        cmd
    })?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("babel/da.txt")?,
        "plural[\\0]=ingen\nplural[\\1]=en\n"
    );

    let output = run({
        let mut cmd = test.apply_job_command();
        cmd.args(locales);
        cmd
    })?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("No changes"));
    assert_eq!(
        test.read_json("translations.i18n.json")?["plural"],
        json!({ "en": { "0": "none", "1": "one" }, "da": { "0": "ingen", "1": "en" } })
    );

    Ok(())
}

#[test]
fn test_deleted_list_line_keeps_neighbours() -> Result<()> {
    let test = translated_project()?;
    test.write_file("babel/de.txt", "arrayvalue[0]=fünf\narrayvalue[2]=in\n")?;

    let output = run(test.apply_job_command())?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert_eq!(
        test.read_json("thething.i18n")?["arrayvalue"]["de"],
        json!(["fünf", "", "in", "", ""])
    );

    Ok(())
}
